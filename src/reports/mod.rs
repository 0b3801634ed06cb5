use comfy_table::presets::ASCII_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use scepttr::helix::TripleHelix;
use scepttr::library::LibraryStats;
use scepttr::optimizer::{AcceptedChange, LowConfidenceReport};
use scepttr::params::ParameterId;
use scepttr::residue::Residue;
use scepttr::scorer::register::{Assignment, Register};
use scepttr::scorer::RankedTm;

const BOLD: &str = "\x1b[1m";
const BLUE: &str = "\x1b[34m";
const RED: &str = "\x1b[31m";
const GREEN: &str = "\x1b[32m";
const RESET: &str = "\x1b[0m";

/// Tm below which a composition rarely folds in practice.
const UNRELIABLE_TM: f64 = 10.0;

fn highlight(r: Residue) -> String {
    let style = match r {
        Residue::LYS => format!("{BOLD}{BLUE}"),
        Residue::ARG => BLUE.to_string(),
        Residue::GLU | Residue::ASP => format!("{BOLD}{RED}"),
        Residue::GLN => format!("{BOLD}{GREEN}"),
        r if r.is_aromatic() => BOLD.to_string(),
        _ => return r.to_string(),
    };
    format!("{style}{r}{RESET}")
}

fn colored_sequence(seq: &[Residue]) -> String {
    seq.iter().map(|r| highlight(*r)).collect()
}

/// Staggered three-strand alignment of one register.
fn print_alignment(helix: &TripleHelix, ranked: &RankedTm) {
    let ids = ranked.register.assignment.ids();
    for (strand, id) in ids.iter().enumerate() {
        let pad = " ".repeat(strand);
        println!("{}: {}{}", id, pad, colored_sequence(&helix.peptides[*id]));
    }
}

fn uses_all_peptides(assignment: Assignment, num_pep: usize) -> bool {
    num_pep == 1 || assignment.is_correct_composition(num_pep)
}

/// Headline numbers, best and second-best alignments and the composition grid.
pub fn print_register_report(title: &str, helix: &TripleHelix) {
    let s = &helix.score;
    let num_pep = helix.num_pep();

    println!("\n🧬 === {} === 🧬", title);
    println!("Number of peptides: {}", num_pep);
    println!("Number of amino acids: {}", helix.num_aa);
    println!("{}...peptide...{}", helix.n_term, helix.c_term);
    println!("Experimental Tm = {}", helix.exp_tm.value());
    println!(
        "Deviation (Tm(predicted) - Tm(experimental)) = {:.2}",
        s.correct.tm - helix.exp_tm.value()
    );
    if !helix.phase_consistent {
        println!("{BOLD}{RED}WARNING: no Gly found every third residue; phase was guessed.{RESET}");
    }

    let best_terms = s.tensor.get(s.best.register);
    println!(
        "\nThe most stable register/composition is {{{}}}. Tm = {:.2}.",
        s.best.register.assignment, s.best.tm
    );
    println!(
        "Total charge = {}, net charge = {}",
        best_terms.total_charge, best_terms.net_charge
    );
    if !uses_all_peptides(s.best.register.assignment, num_pep) {
        println!(
            "{BOLD}{RED}WARNING: The most stable register/composition does not include all the peptides you input.{RESET}"
        );
    }
    print_alignment(helix, &s.best);

    if let (Some(second), Some(spec)) = (&s.second_best, s.specificity) {
        println!(
            "\nThe second most stable register/composition is {{{}}}. Tm = {:.2}.",
            second.register.assignment, second.tm
        );
        print_alignment(helix, second);
        println!("\nThe specificity is = {:.2}.", spec);
    }

    print_composition_table(helix);
}

fn print_composition_table(helix: &TripleHelix) {
    let s = &helix.score;
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec![
        Cell::new("Composition").add_attribute(Attribute::Bold),
        Cell::new("Propensity"),
        Cell::new("Pairwise"),
        Cell::new("Net"),
        Cell::new("Tm").fg(Color::Cyan),
    ]);

    for assignment in Assignment::all(helix.num_pep()) {
        let reg = Register::canonical(assignment);
        let t = s.tensor.get(reg);

        let mut tm = Cell::new(format!("{:.2}", t.tm));
        if reg == s.best.register {
            tm = tm.fg(Color::Blue).add_attribute(Attribute::Bold);
        } else if s.second_best.map(|r| r.register) == Some(reg) {
            tm = tm.fg(Color::Red);
        }
        if t.tm < UNRELIABLE_TM {
            tm = tm.add_attribute(Attribute::Dim);
        }

        table.add_row(vec![
            Cell::new(format!("{{{}}}", assignment)),
            Cell::new(format!("{:.2}", t.propensity)),
            Cell::new(format!("{:.2}", t.pairwise)),
            Cell::new(t.net_charge),
            tm,
        ]);
    }

    for i in 1..=4 {
        if let Some(col) = table.column_mut(i) {
            col.set_cell_alignment(CellAlignment::Right);
        }
    }

    println!("\nMelting temperatures of all canonical registers.");
    println!("Best in blue, second best in red, Tm < 10 dimmed.");
    println!("{}", table);
}

pub fn print_low_confidence(report: &LowConfidenceReport) {
    println!(
        "\nTotal number of low confidence interactions: {} (over all canonical compositions).",
        report.total
    );
    if report.total == 0 {
        return;
    }

    let mut table = Table::new();
    table.load_preset(ASCII_FULL);
    table.set_header(vec![
        Cell::new("Kind").add_attribute(Attribute::Bold),
        Cell::new("Pair (Yaa,Xaa)"),
        Cell::new("Occurrences"),
    ]);
    for (id, n) in &report.interactions {
        let (kind, a, b) = match *id {
            ParameterId::Axial(a, b) => ("axial", a, b),
            ParameterId::Lateral(a, b) => ("lateral", a, b),
            _ => continue,
        };
        table.add_row(vec![
            Cell::new(kind),
            Cell::new(format!("{},{}", a, b)),
            Cell::new(n).set_alignment(CellAlignment::Right),
        ]);
    }
    println!("{}", table);
}

/// Fit outcome: error before/after and the most recent moves.
pub fn print_fit_summary(initial_ssd: f64, stats: &LibraryStats, rounds: usize, accepted: &[AcceptedChange]) {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("Metric").add_attribute(Attribute::Bold),
        Cell::new("Value"),
    ]);

    let worst = match stats.worst {
        Some((i, d)) => format!("#{} ({:.2})", i, d),
        None => "-".to_string(),
    };
    let rows = [
        ("Helices", stats.count.to_string()),
        ("Rounds", rounds.to_string()),
        ("Accepted changes", accepted.len().to_string()),
        ("Initial SSD", format!("{:.4}", initial_ssd)),
        ("Final SSD", format!("{:.4}", stats.sum_squared_deviation)),
        ("Mean deviation", format!("{:.3}", stats.mean_deviation())),
        ("RMS deviation", format!("{:.3}", stats.rms_deviation())),
        ("Worst helix", worst),
    ];
    for (k, v) in rows {
        let cell = if k == "Final SSD" && stats.sum_squared_deviation < initial_ssd {
            Cell::new(v).fg(Color::Green)
        } else {
            Cell::new(v)
        };
        table.add_row(vec![Cell::new(k), cell.set_alignment(CellAlignment::Right)]);
    }
    println!("{}", table);

    if accepted.is_empty() {
        return;
    }
    let mut moves = Table::new();
    moves.load_preset(ASCII_FULL);
    moves.set_header(vec!["Round", "Parameter", "Old", "New", "SSD"]);
    for c in accepted.iter().rev().take(20) {
        let dir = if c.new < c.old { Color::Red } else { Color::Green };
        moves.add_row(vec![
            Cell::new(c.round),
            Cell::new(c.id.to_string()),
            Cell::new(format!("{:.2}", c.old)),
            Cell::new(format!("{:.2}", c.new)).fg(dir),
            Cell::new(format!("{:.4}", c.ssd)),
        ]);
    }
    println!("\nLast accepted changes:");
    println!("{}", moves);
}
