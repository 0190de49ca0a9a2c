//! Scenario definitions and loading.

use hhl_state::Operator;
use num_complex::Complex64;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{HhlError, HhlResult};

/// One `A·x = b` problem to run through the pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    /// Display name.
    pub name: String,
    /// Real part of A, row-major.
    pub a: [[f64; 2]; 2],
    /// Imaginary part of A, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub a_imag: Option<[[f64; 2]; 2]>,
    /// Right-hand side.
    pub b: [f64; 2],
    /// Fail the scenario if the ratios disagree.
    #[serde(default)]
    pub verify: bool,
    /// Clock width; the pipeline default applies when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clock_bits: Option<u32>,
}

impl Scenario {
    /// A real scenario with the default clock width.
    pub fn new(name: impl Into<String>, a: [[f64; 2]; 2], b: [f64; 2], verify: bool) -> Self {
        Self {
            name: name.into(),
            a,
            a_imag: None,
            b,
            verify,
            clock_bits: None,
        }
    }

    /// The four reference problems.
    ///
    /// A = [[1, -1/3], [-1/3, 1]] scales to lam = (1, 2) and
    /// A = [[1, -1/2], [-1/2, 1]] to lam = (1, 3); each is paired with
    /// b = (0, 1) and b = (1, 0). Only the first is verified.
    pub fn defaults() -> Vec<Scenario> {
        let third = [[1.0, -1.0 / 3.0], [-1.0 / 3.0, 1.0]];
        let half = [[1.0, -0.5], [-0.5, 1.0]];
        vec![
            Scenario::new("lam-1-2/b=|1>", third, [0.0, 1.0], true),
            Scenario::new("lam-1-3/b=|1>", half, [0.0, 1.0], false),
            Scenario::new("lam-1-2/b=|0>", third, [1.0, 0.0], false),
            Scenario::new("lam-1-3/b=|0>", half, [1.0, 0.0], false),
        ]
    }

    /// Load a list of scenarios; `.json` files are read as JSON, anything
    /// else as YAML.
    pub fn load_file<P: AsRef<Path>>(path: P) -> HhlResult<Vec<Scenario>> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(|e| HhlError::Config(format!("{}: {e}", path.display())))?;

        let is_json = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("json"));
        let scenarios: Vec<Scenario> = if is_json {
            serde_json::from_str(&contents)
                .map_err(|e| HhlError::Config(format!("{}: {e}", path.display())))?
        } else {
            serde_yaml_ng::from_str(&contents)
                .map_err(|e| HhlError::Config(format!("{}: {e}", path.display())))?
        };

        if scenarios.is_empty() {
            return Err(HhlError::Config(format!(
                "{}: no scenarios defined",
                path.display()
            )));
        }
        Ok(scenarios)
    }

    /// A as an operator.
    pub fn matrix(&self) -> HhlResult<Operator> {
        let im = self.a_imag.unwrap_or([[0.0; 2]; 2]);
        let rows = (0..2)
            .map(|r| {
                (0..2)
                    .map(|c| Complex64::new(self.a[r][c], im[r][c]))
                    .collect()
            })
            .collect();
        Ok(Operator::from_rows(rows)?)
    }

    /// b as a column operator.
    pub fn rhs(&self) -> HhlResult<Operator> {
        Ok(Operator::from_real_column(&self.b)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let all = Scenario::defaults();
        assert_eq!(all.len(), 4);
        assert_eq!(all.iter().filter(|s| s.verify).count(), 1);
        assert!(all.iter().all(|s| s.matrix().unwrap().is_hermitian(1e-12)));
    }

    #[test]
    fn test_yaml_file() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(
            file,
            "- name: diag\n  a: [[2.0, 0.0], [0.0, 4.0]]\n  b: [0.0, 1.0]\n  verify: true\n  clock_bits: 2"
        )
        .unwrap();
        let s = Scenario::load_file(file.path()).unwrap();
        assert_eq!(s.len(), 1);
        assert_eq!(s[0].name, "diag");
        assert_eq!(s[0].clock_bits, Some(2));
        assert!(s[0].a_imag.is_none());
    }

    #[test]
    fn test_json_file_with_imaginary_part() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(
            file,
            r#"[{{"name":"c","a":[[2,0],[0,2]],"a_imag":[[0,-1],[1,0]],"b":[1,0]}}]"#
        )
        .unwrap();
        let s = Scenario::load_file(file.path()).unwrap();
        assert!(!s[0].verify);
        let a = s[0].matrix().unwrap();
        assert!((a.get(0, 1) - Complex64::new(0.0, -1.0)).norm() < 1e-12);
        assert!(a.is_hermitian(1e-12));
    }

    #[test]
    fn test_empty_file_rejected() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(file, "[]").unwrap();
        assert!(matches!(
            Scenario::load_file(file.path()),
            Err(HhlError::Config(_))
        ));
    }
}
