//! Saving computed results to `.npz` archives.

use std::{ fs, path::{ Path, PathBuf } };
use ndarray::{ self as nd, Dimension };
use ndarray_npy::NpzWriter;
use num_complex::Complex64 as C64;
use tracing::info;
use crate::{
    error::JcResult,
    model::JcReport,
};

/// File name used by [`write_report`].
pub const REPORT_FILE: &str = "spectrum.npz";

fn add_complex<W, D>(
    npz: &mut NpzWriter<W>,
    name: &str,
    arr: &nd::Array<C64, D>,
) -> JcResult<()>
where
    W: std::io::Write + std::io::Seek,
    D: Dimension,
{
    npz.add_array(format!("{name}_re"), &arr.mapv(|z| z.re))?;
    npz.add_array(format!("{name}_im"), &arr.mapv(|z| z.im))?;
    Ok(())
}

/// Write all arrays of `report` to `outdir/spectrum.npz`, creating `outdir` if
/// needed, and return the path of the written file.
///
/// Complex arrays are split into `*_re` and `*_im` entries. Eigenvectors are
/// stored as the columns of `eigenstates_*`. `ground_parity` is `+1`, `-1`, or
/// NaN if the ground state was not classified.
pub fn write_report<P>(outdir: P, report: &JcReport) -> JcResult<PathBuf>
where P: AsRef<Path>
{
    let outdir = outdir.as_ref();
    fs::create_dir_all(outdir)?;
    let outfile = outdir.join(REPORT_FILE);
    let config = &report.config;
    let mut npz = NpzWriter::new(fs::File::create(&outfile)?);
    npz.add_array("energies", &report.spectrum.energies)?;
    add_complex(&mut npz, "eigenstates", &report.spectrum.eigenstates)?;
    add_complex(&mut npz, "hamiltonian", &report.hamiltonian)?;
    add_complex(&mut npz, "ground_state", &report.spectrum.ground_state())?;
    add_complex(&mut npz, "parity_combined", &report.parity_combined)?;
    npz.add_array(
        "ground_parity",
        &nd::array![report.ground_parity.map_or(f64::NAN, |p| p.eigenvalue())],
    )?;
    npz.add_array("cavity_freq", &nd::array![config.cavity_freq()])?;
    npz.add_array("atom_freq", &nd::array![config.atom_freq()])?;
    npz.add_array("coupling", &nd::array![config.coupling()])?;
    npz.add_array("decay_rate", &nd::array![config.decay_rate()])?;
    npz.add_array("truncation", &nd::array![config.truncation() as u32])?;
    npz.add_array("use_rwa", &nd::array![u8::from(config.use_rwa())])?;
    npz.finish()?;
    info!(path = %outfile.display(), "wrote report");
    Ok(outfile)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray_npy::NpzReader;
    use crate::{ config::ModelConfig, model::run };

    #[test]
    fn report_round_trip_on_disk() {
        let outdir = std::env::temp_dir()
            .join(format!("jc_parity_output_{}", std::process::id()));
        let report = run(&ModelConfig::default()).unwrap();
        let path = write_report(&outdir, &report).unwrap();
        assert!(path.ends_with(REPORT_FILE));

        let mut npz = NpzReader::new(fs::File::open(&path).unwrap()).unwrap();
        let energies: nd::Array1<f64> = npz.by_name("energies.npy").unwrap();
        assert_eq!(energies, report.spectrum.energies);
        let h_re: nd::Array2<f64> = npz.by_name("hamiltonian_re.npy").unwrap();
        assert_eq!(h_re.dim(), (10, 10));
        let parity: nd::Array1<f64> = npz.by_name("ground_parity.npy").unwrap();
        assert_eq!(parity[0], 1.0);
        let nmax: nd::Array1<u32> = npz.by_name("truncation.npy").unwrap();
        assert_eq!(nmax[0], 5);

        fs::remove_dir_all(&outdir).unwrap();
    }
}
