use serde::{Deserialize, Serialize};

/// Dispersion formula used to evaluate the refractive index at the catalog
/// reference temperature. Wavelengths are in micrometers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "formula", rename_all = "snake_case")]
pub enum Dispersion {
    /// n^2 - 1 = sum B_i λ^2 / (λ^2 - C_i)
    Sellmeier { b: [f64; 3], c: [f64; 3] },
    /// n^2 = A0 + A1 λ^2 + A2 λ^-2 + A3 λ^-4 + A4 λ^-6 + A5 λ^-8
    Schott { a: [f64; 6] },
}

impl Dispersion {
    pub fn refractive_index(&self, wavelength_um: f64) -> f64 {
        let l2 = wavelength_um * wavelength_um;
        let n2 = match self {
            Dispersion::Sellmeier { b, c } => {
                1.0 + b
                    .iter()
                    .zip(c.iter())
                    .map(|(bi, ci)| bi * l2 / (l2 - ci))
                    .sum::<f64>()
            }
            Dispersion::Schott { a } => {
                a[0] + a[1] * l2
                    + a[2] / l2
                    + a[3] / l2.powi(2)
                    + a[4] / l2.powi(3)
                    + a[5] / l2.powi(4)
            }
        };
        n2.sqrt()
    }
}

/// Schott thermal coefficients. A `None` coefficient means the vendor did not
/// publish it (serialized as `null`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThermalData {
    pub d0: Option<f64>,
    pub d1: Option<f64>,
    pub d2: Option<f64>,
    pub e0: Option<f64>,
    pub e1: Option<f64>,
    pub ltk: Option<f64>,
    pub tref: Option<f64>,
}

impl ThermalData {
    /// `[D0, D1, D2, E0, E1, λtk, Tref]`, missing entries as NaN.
    pub fn to_vec(&self) -> Vec<f64> {
        [self.d0, self.d1, self.d2, self.e0, self.e1, self.ltk, self.tref]
            .iter()
            .map(|v| v.unwrap_or(f64::NAN))
            .collect()
    }
}

/// One internal transmittance measurement.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TransmittanceSample {
    pub wavelength: f64,
    pub tau: f64,
    pub thickness: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Glass {
    pub name: String,
    #[serde(default)]
    pub supplier: String,
    pub dispersion: Dispersion,
    #[serde(default)]
    pub thermal: ThermalData,
    /// Sorted by wavelength after loading.
    #[serde(default)]
    pub transmittance: Vec<TransmittanceSample>,
}

impl Glass {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn supplier(&self) -> &str {
        &self.supplier
    }

    /// Label used for curves and table headers: `<name>_<supplier>`.
    pub fn display_name(&self) -> String {
        format!("{}_{}", self.name(), self.supplier())
    }

    pub fn thermal_data(&self) -> Vec<f64> {
        self.thermal.to_vec()
    }

    pub fn has_thermal_data(&self) -> bool {
        !self.thermal_data().iter().any(|v| v.is_nan())
    }

    pub fn has_transmittance_data(&self) -> bool {
        !self.transmittance.is_empty()
    }

    pub fn refractive_index(&self, wavelength_um: f64) -> f64 {
        self.dispersion.refractive_index(wavelength_um)
    }

    /// Absolute dn/dT in 1/K at each temperature (Celsius) for a wavelength in
    /// micrometers. Yields NaN everywhere when thermal data is incomplete.
    pub fn dn_dt_abs(&self, temperatures: &[f64], wavelength_um: f64) -> Vec<f64> {
        let t = self.thermal_data();
        let (d0, d1, d2, e0, e1, ltk, tref) = (t[0], t[1], t[2], t[3], t[4], t[5], t[6]);

        let n = self.refractive_index(wavelength_um);
        let prefactor = (n * n - 1.0) / (2.0 * n);
        let stk = if ltk > 0.0 {
            1.0
        } else if ltk < 0.0 {
            -1.0
        } else {
            0.0
        };
        let denom = wavelength_um * wavelength_um - stk * ltk * ltk;

        temperatures
            .iter()
            .map(|&temp| {
                let dt = temp - tref;
                prefactor
                    * (d0 + 2.0 * d1 * dt + 3.0 * d2 * dt * dt + (e0 + 2.0 * e1 * dt) / denom)
            })
            .collect()
    }

    /// Internal transmittance at a wavelength (micrometers) through the given
    /// thickness (mm). NaN outside the measured wavelength range.
    pub fn transmittance(&self, wavelength_um: f64, thickness_mm: f64) -> f64 {
        let samples = &self.transmittance;
        let (first, last) = match (samples.first(), samples.last()) {
            (Some(f), Some(l)) => (f, l),
            _ => return f64::NAN,
        };
        if wavelength_um < first.wavelength || wavelength_um > last.wavelength {
            return f64::NAN;
        }

        let pos = samples.partition_point(|s| s.wavelength < wavelength_um);
        let (tau, ref_thickness) = if pos == 0 {
            (first.tau, first.thickness)
        } else {
            let lo = &samples[pos - 1];
            let hi = &samples[pos.min(samples.len() - 1)];
            if (hi.wavelength - lo.wavelength).abs() < f64::EPSILON {
                (hi.tau, hi.thickness)
            } else {
                let f = (wavelength_um - lo.wavelength) / (hi.wavelength - lo.wavelength);
                (
                    lo.tau + f * (hi.tau - lo.tau),
                    lo.thickness + f * (hi.thickness - lo.thickness),
                )
            }
        };

        if ref_thickness <= 0.0 {
            return tau;
        }
        tau.max(0.0).powf(thickness_mm / ref_thickness)
    }

    pub fn transmittance_curve(&self, wavelengths_um: &[f64], thickness_mm: f64) -> Vec<f64> {
        wavelengths_um
            .iter()
            .map(|&w| self.transmittance(w, thickness_mm))
            .collect()
    }

    pub(crate) fn sort_transmittance(&mut self) {
        self.transmittance.sort_by(|a, b| {
            a.wavelength
                .partial_cmp(&b.wavelength)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
    }
}
