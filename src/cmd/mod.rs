pub mod evaluate;
pub mod fit;
pub mod score;

use scepttr::config::InputFiles;
use scepttr::helix::loader::load_library;
use scepttr::optimizer::InteractionCensus;
use tracing::warn;

/// Training library for census purposes. A library that fails to load only
/// costs the census, so it is reported and treated as empty.
pub fn census_or_empty(inputs: &InputFiles) -> InteractionCensus {
    match load_library(&inputs.library) {
        Ok(lib) => InteractionCensus::from_library(&lib),
        Err(e) => {
            warn!(
                "⚠️  Training library '{}' unavailable ({}); confidence counts will be empty.",
                inputs.library.display(),
                e
            );
            InteractionCensus::default()
        }
    }
}
