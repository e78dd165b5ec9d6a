use std::{ f64::consts::TAU, path::PathBuf };
use anyhow::Context;
use tracing_subscriber::EnvFilter;
use jc_parity::{ ModelConfig, output, run };

/// Call `println!` and immediately flush.
#[macro_export]
macro_rules! println_flush {
    ( $fmt:literal $(, $val:expr )* $(,)?) => {
        println!($fmt $(, $val )*);
        std::io::Write::flush(&mut std::io::stdout())?;
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info"))
        )
        .with_target(false)
        .init();

    let config: ModelConfig
        = match std::env::args_os().nth(1) {
            Some(path) => {
                let path = PathBuf::from(path);
                ModelConfig::load(&path)
                    .with_context(|| {
                        format!("failed to load config {}", path.display())
                    })?
            },
            None => ModelConfig::default(),
        };
    let outdir = PathBuf::from("output/jc_parity");

    let report = run(&config).context("failed to solve model")?;

    println_flush!(
        "wc = {:.4}, wa = {:.4}, g = {:.4} (x 2π); N = {}; RWA = {}",
        config.cavity_freq() / TAU,
        config.atom_freq() / TAU,
        config.coupling() / TAU,
        config.truncation(),
        config.use_rwa(),
    );
    println_flush!("energies (x 2π):");
    for (k, e) in report.spectrum.energies.iter().enumerate() {
        println_flush!("  {:3}  {:+.6}", k, e / TAU);
    }
    println_flush!("ground state components:");
    for (state, prob) in report.ground_components.iter() {
        println_flush!(
            "  |n = {}, {:?}>  {:.6}", state.photons(), state.atomic_state(), prob);
    }
    println_flush!(
        "|P psi_0 + psi_0| = {:.3e}", report.parity_combined_norm());
    match report.ground_parity {
        Some(parity) => { println_flush!("ground state parity: {}", parity); },
        None => { println_flush!("ground state parity: indefinite"); },
    }

    let path = output::write_report(&outdir, &report)
        .with_context(|| format!("failed to write to {}", outdir.display()))?;
    println_flush!("wrote {}", path.display());
    Ok(())
}
