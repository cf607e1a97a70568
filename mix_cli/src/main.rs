//! # Proportion CLI Application
//!
//! Terminal front end for the IS 10262 mix design engine.
//!
//! Two modes:
//! - interactive (default): prompts for the key stipulations with the
//!   published M35 worked example as defaults, then prints the design
//! - `--json`: reads a complete `MixDesignInput` as JSON on stdin and
//!   writes the `MixDesignResult` as JSON on stdout

use std::io::{self, BufRead, Read, Write};
use std::process::ExitCode;

use mix_core::calculations::mix_design::{calculate, MixDesignInput, MixDesignResult};
use mix_core::materials::{AggregateSize, ConcreteGrade, Exposure, FineAggZone};

fn prompt_f64(prompt: &str, default: f64) -> f64 {
    print!("{}", prompt);
    if io::stdout().flush().is_err() {
        return default;
    }

    let mut input = String::new();
    if io::stdin().lock().read_line(&mut input).is_err() {
        return default;
    }

    input.trim().parse().unwrap_or(default)
}

fn prompt_grade(prompt: &str, default: ConcreteGrade) -> ConcreteGrade {
    print!("{}", prompt);
    if io::stdout().flush().is_err() {
        return default;
    }

    let mut input = String::new();
    if io::stdin().lock().read_line(&mut input).is_err() {
        return default;
    }

    let trimmed = input.trim();
    if trimmed.is_empty() {
        return default;
    }
    match ConcreteGrade::from_str_flexible(trimmed) {
        Ok(grade) => grade,
        Err(err) => {
            println!("  {err}; keeping {default}");
            default
        }
    }
}

fn run_json_mode() -> ExitCode {
    let mut buffer = String::new();
    if let Err(err) = io::stdin().read_to_string(&mut buffer) {
        eprintln!("error: failed to read stdin: {err}");
        return ExitCode::FAILURE;
    }

    let input: MixDesignInput = match serde_json::from_str(&buffer) {
        Ok(input) => input,
        Err(err) => {
            eprintln!("error: invalid input JSON: {err}");
            return ExitCode::FAILURE;
        }
    };

    match calculate(&input) {
        Ok(result) => match serde_json::to_string_pretty(&result) {
            Ok(json) => {
                println!("{json}");
                ExitCode::SUCCESS
            }
            Err(err) => {
                eprintln!("error: failed to serialize result: {err}");
                ExitCode::FAILURE
            }
        },
        Err(err) => {
            eprintln!("error [{}]: {err}", err.error_code());
            ExitCode::FAILURE
        }
    }
}

fn print_result(input: &MixDesignInput, result: &MixDesignResult) {
    println!("═══════════════════════════════════════");
    println!("  MIX DESIGN - {} / {}", input.grade, input.exposure);
    println!("═══════════════════════════════════════");
    println!();
    println!("Target strength:  {:.2} MPa", result.target_strength.target_mean_mpa);
    println!(
        "W/C ratio:        {:.2} (max {:.2} for durability) - {}",
        result.water_cement.adopted_ratio,
        result.water_cement.max_ratio_durability,
        result.water_cement.check
    );
    println!();
    println!("Per m3 (SSD basis):");
    println!("  Cement:     {:>8.1} kg", result.ssd_masses.cement_kg);
    println!("  Water:      {:>8.1} kg", result.ssd_masses.water_kg);
    println!("  Fine agg:   {:>8.1} kg", result.ssd_masses.fine_agg_kg);
    println!("  Coarse agg: {:>8.1} kg", result.ssd_masses.coarse_agg_kg);
    println!("  Admixture:  {:>8.2} kg", result.ssd_masses.admixture_kg);
    println!();
    println!("Field correction:");
    println!("  Water to add:   {:>8.1} kg", result.water_content.to_be_added_kg);
    println!("  Fine agg:       {:>8.1} kg", result.field_masses.fine_agg_kg);
    println!("  Coarse agg:     {:>8.1} kg", result.field_masses.coarse_agg_kg);
    println!();
    let w = &result.batching.by_weight;
    println!(
        "Batching by weight: {:.3} : {:.0} : {:.3} : {:.3} (CA20) : {:.3} (CA10)",
        w.water, w.cement, w.sand, w.ca20, w.ca10
    );
    let v = &result.batching.by_volume;
    println!(
        "Batching by volume: {:.3} : {:.0} : {:.3} : {:.3} (CA20) : {:.3} (CA10)",
        v.water, v.cement, v.sand, v.ca20, v.ca10
    );
    println!();
    println!(
        "Cement content {:.0} kg/m3 (min {:.0}, max {:.0}) - {}",
        result.cement_content.content_kg,
        result.cement_content.min_required_kg,
        result.cement_content.max_permitted_kg,
        result.cement_content.check
    );
}

fn main() -> ExitCode {
    if std::env::args().any(|arg| arg == "--json") {
        return run_json_mode();
    }

    println!("Proportion CLI - IS 10262 Mix Design");
    println!("====================================");
    println!();
    println!("Press Enter to accept the M35 worked-example defaults.");
    println!();

    let grade = prompt_grade("Grade designation [M35]: ", ConcreteGrade::M35);
    let slump = prompt_f64("Target slump (mm) [140]: ", 140.0);
    let wc_ratio = prompt_f64("Adopted W/C ratio [0.40]: ", 0.4);
    let cement_sg = prompt_f64("Cement specific gravity [2.90]: ", 2.9);
    let reduction = prompt_f64("Superplasticizer water reduction (%) [15]: ", 15.0);

    let input = MixDesignInput {
        cement_sg,
        ca_sg: 2.66,
        workability_slump_mm: slump,
        adopted_wc_ratio: wc_ratio,
        use_superplasticizer: reduction > 0.0,
        superplasticizer_pct: 0.5,
        water_reduction_pct: reduction,
        fa_absorption_pct: 1.05,
        ..MixDesignInput::new(grade, Exposure::Severe, AggregateSize::Mm20, FineAggZone::II)
    };

    println!();
    match calculate(&input) {
        Ok(result) => {
            print_result(&input, &result);
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("Calculation failed [{}]: {err}", err.error_code());
            ExitCode::FAILURE
        }
    }
}
