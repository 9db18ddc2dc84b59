//! Migration cost and CO₂ simulator.
//!
//! Projects what an establishment saves by moving its fleet from licensed
//! proprietary software on short-lived hardware to free software on
//! reconditioned machines. All amounts are euros; masses are kilograms.

use serde::{Deserialize, Serialize};

/// Per-seat and per-unit reference figures behind the projection.
mod costs {
    /// One-time Windows licence per PC.
    pub const WINDOWS_LICENSE: f64 = 145.0;
    /// Office 365 education subscription per PC per year.
    pub const OFFICE365_PER_YEAR: f64 = 70.0;
    /// Adobe Creative Cloud subscription per PC per year.
    pub const ADOBE_PER_YEAR: f64 = 600.0;
    /// Commercial antivirus per PC per year.
    pub const ANTIVIRUS_PER_YEAR: f64 = 30.0;
    /// Buying a new PC.
    pub const PC_REPLACEMENT: f64 = 500.0;
    /// Reconditioning an existing PC instead.
    pub const PC_RECONDITIONING: f64 = 50.0;
    pub const MAINTENANCE_PER_PC_PER_YEAR: f64 = 80.0;
    /// Share of maintenance saved on a Linux fleet.
    pub const MAINTENANCE_REDUCTION_LINUX: f64 = 0.4;
    pub const ENERGY_PER_PC_PER_YEAR: f64 = 50.0;
    /// Share of energy saved by lighter systems on the same hardware.
    pub const ENERGY_REDUCTION_LINUX: f64 = 0.15;
    /// Training one teacher on the free-software stack.
    pub const TRAINING_PER_TEACHER: f64 = 200.0;
    /// Teachers to train per PC in the fleet.
    pub const TEACHER_RATIO: f64 = 0.1;
    /// Manufacturing CO₂ amortized per PC per year of extended life.
    pub const CO2_PER_PC_PER_YEAR_KG: f64 = 50.0;
    /// Electronic waste avoided per PC kept alive.
    pub const EWASTE_PER_PC_KG: f64 = 8.0;
    /// CO₂ absorbed by one tree in a year.
    pub const CO2_PER_TREE_PER_YEAR_KG: f64 = 22.0;
    /// Extra years a reconditioned PC stays in service.
    pub const LIFE_EXTENSION_YEARS: f64 = 5.0;
    /// Fleet age at which PCs are normally written off.
    pub const REPLACEMENT_AGE_YEARS: u32 = 7;
}

/// Kind of establishment running the simulation. Labels only, the
/// projection itself is identical for all profiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Profile {
    Ecole,
    College,
    Lycee,
    Collectivite,
}

impl Profile {
    /// Display label shown in the front-end selector.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Profile::Ecole => "🏫 École primaire",
            Profile::College => "🎒 Collège",
            Profile::Lycee => "🎓 Lycée",
            Profile::Collectivite => "🏛️ Collectivité",
        }
    }
}

/// Form inputs for one projection.
///
/// Defaults mirror a typical collège fleet, so an empty request body still
/// produces a meaningful report.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulatorInputs {
    pub profile: Profile,
    pub pc_count: u32,
    pub avg_age_years: u32,
    /// Collected by the form for context, not part of any formula yet.
    pub electricity_price: f64,
    pub years_projection: u32,
    pub has_windows: bool,
    pub has_office365: bool,
    pub has_adobe: bool,
    pub has_antivirus: bool,
}

impl Default for SimulatorInputs {
    fn default() -> Self {
        Self {
            profile: Profile::College,
            pc_count: 100,
            avg_age_years: 5,
            electricity_price: 0.25,
            years_projection: 5,
            has_windows: true,
            has_office365: true,
            has_adobe: false,
            has_antivirus: true,
        }
    }
}

/// Full projection for one set of inputs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SimulatorReport {
    pub profile: Profile,
    /// PCs due for replacement over the projection, by fleet age.
    pub pcs_to_replace: u32,
    pub teachers_trained: u32,
    pub windows_savings: f64,
    pub office_savings: f64,
    pub adobe_savings: f64,
    pub antivirus_savings: f64,
    pub total_license_savings: f64,
    /// New-PC purchases avoided by reconditioning instead.
    pub hardware_extension_savings: f64,
    pub maintenance_savings: f64,
    pub reconditioning_cost: f64,
    pub total_hardware_savings: f64,
    pub energy_savings: f64,
    pub training_cost: f64,
    pub co2_avoided_kg: f64,
    pub ewaste_avoided_kg: f64,
    /// CO₂ savings expressed as trees planted.
    pub trees_equivalent: u32,
    pub total_savings: f64,
    pub total_costs: f64,
    pub net_savings: f64,
    /// Months until the transition pays for itself, absent when it never
    /// does over the projection.
    pub roi_months: Option<u32>,
}

/// Run the projection.
#[must_use]
pub fn simulate(inputs: &SimulatorInputs) -> SimulatorReport {
    let pcs = f64::from(inputs.pc_count);
    let years = f64::from(inputs.years_projection);

    let windows_savings = if inputs.has_windows { costs::WINDOWS_LICENSE * pcs } else { 0.0 };
    let office_savings = if inputs.has_office365 {
        costs::OFFICE365_PER_YEAR * pcs * years
    } else {
        0.0
    };
    let adobe_savings = if inputs.has_adobe { costs::ADOBE_PER_YEAR * pcs * years } else { 0.0 };
    let antivirus_savings = if inputs.has_antivirus {
        costs::ANTIVIRUS_PER_YEAR * pcs * years
    } else {
        0.0
    };
    let total_license_savings =
        windows_savings + office_savings + adobe_savings + antivirus_savings;

    // Older fleets have proportionally more machines at the end of their
    // write-off age; past seven years the whole fleet and then some would
    // have been replaced.
    let pcs_to_replace = inputs.pc_count * inputs.avg_age_years / costs::REPLACEMENT_AGE_YEARS;
    let replaced = f64::from(pcs_to_replace);

    let hardware_extension_savings = replaced * costs::PC_REPLACEMENT;
    let maintenance_savings =
        pcs * costs::MAINTENANCE_PER_PC_PER_YEAR * costs::MAINTENANCE_REDUCTION_LINUX * years;
    let reconditioning_cost = pcs * costs::PC_RECONDITIONING;
    let total_hardware_savings =
        hardware_extension_savings + maintenance_savings - reconditioning_cost;

    let energy_savings =
        pcs * costs::ENERGY_PER_PC_PER_YEAR * costs::ENERGY_REDUCTION_LINUX * years;

    let teachers_trained = (pcs * costs::TEACHER_RATIO).ceil() as u32;
    let training_cost = f64::from(teachers_trained) * costs::TRAINING_PER_TEACHER;

    let co2_avoided_kg = replaced * costs::CO2_PER_PC_PER_YEAR_KG * costs::LIFE_EXTENSION_YEARS;
    let ewaste_avoided_kg = replaced * costs::EWASTE_PER_PC_KG;
    let trees_equivalent = (co2_avoided_kg / costs::CO2_PER_TREE_PER_YEAR_KG).round() as u32;

    let total_savings = total_license_savings + total_hardware_savings + energy_savings;
    let total_costs = training_cost + reconditioning_cost;
    // Reconditioning already reduced the hardware line, so it is added back
    // here rather than charged twice.
    let net_savings = total_savings - total_costs + reconditioning_cost;

    let roi_months = if net_savings > 0.0 && inputs.years_projection > 0 {
        Some((total_costs / (net_savings / years / 12.0)).ceil() as u32)
    } else {
        None
    };

    SimulatorReport {
        profile: inputs.profile,
        pcs_to_replace,
        teachers_trained,
        windows_savings,
        office_savings,
        adobe_savings,
        antivirus_savings,
        total_license_savings,
        hardware_extension_savings,
        maintenance_savings,
        reconditioning_cost,
        total_hardware_savings,
        energy_savings,
        training_cost,
        co2_avoided_kg,
        ewaste_avoided_kg,
        trees_equivalent,
        total_savings,
        total_costs,
        net_savings,
        roi_months,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_college_projection() {
        let report = simulate(&SimulatorInputs::default());

        assert_eq!(report.windows_savings, 14_500.0);
        assert_eq!(report.office_savings, 35_000.0);
        assert_eq!(report.adobe_savings, 0.0);
        assert_eq!(report.antivirus_savings, 15_000.0);
        assert_eq!(report.total_license_savings, 64_500.0);

        assert_eq!(report.pcs_to_replace, 71);
        assert_eq!(report.hardware_extension_savings, 35_500.0);
        assert_eq!(report.maintenance_savings, 16_000.0);
        assert_eq!(report.reconditioning_cost, 5_000.0);
        assert_eq!(report.total_hardware_savings, 46_500.0);

        assert_eq!(report.energy_savings, 3_750.0);
        assert_eq!(report.teachers_trained, 10);
        assert_eq!(report.training_cost, 2_000.0);

        assert_eq!(report.co2_avoided_kg, 17_750.0);
        assert_eq!(report.ewaste_avoided_kg, 568.0);
        assert_eq!(report.trees_equivalent, 807);

        assert_eq!(report.total_savings, 114_750.0);
        assert_eq!(report.total_costs, 7_000.0);
        assert_eq!(report.net_savings, 112_750.0);
        assert_eq!(report.roi_months, Some(4));
    }

    #[test]
    fn test_empty_body_defaults() {
        let inputs: SimulatorInputs = serde_json::from_str("{}").unwrap();
        assert_eq!(inputs.profile, Profile::College);
        assert_eq!(inputs.pc_count, 100);
        assert!(inputs.has_windows);
        assert!(!inputs.has_adobe);
    }

    #[test]
    fn test_unlicensed_new_fleet_has_no_roi() {
        let inputs = SimulatorInputs {
            avg_age_years: 0,
            years_projection: 1,
            has_windows: false,
            has_office365: false,
            has_adobe: false,
            has_antivirus: false,
            ..SimulatorInputs::default()
        };
        let report = simulate(&inputs);

        assert_eq!(report.pcs_to_replace, 0);
        assert_eq!(report.total_license_savings, 0.0);
        assert!(report.net_savings < 0.0);
        assert_eq!(report.roi_months, None);
    }

    #[test]
    fn test_adobe_dominates_license_savings_when_present() {
        let inputs = SimulatorInputs { has_adobe: true, ..SimulatorInputs::default() };
        let report = simulate(&inputs);
        assert_eq!(report.adobe_savings, 300_000.0);
        assert!(report.adobe_savings > report.office_savings);
    }

    #[test]
    fn test_old_fleet_replaces_more_than_it_owns() {
        // A nine-year-old fleet of 70 PCs would have been through more than
        // one full replacement cycle.
        let inputs =
            SimulatorInputs { pc_count: 70, avg_age_years: 9, ..SimulatorInputs::default() };
        let report = simulate(&inputs);
        assert_eq!(report.pcs_to_replace, 90);
    }

    #[test]
    fn test_teacher_count_rounds_up() {
        let inputs = SimulatorInputs { pc_count: 11, ..SimulatorInputs::default() };
        assert_eq!(simulate(&inputs).teachers_trained, 2);
    }

    #[test]
    fn test_zero_years_projection_never_divides_by_zero() {
        let inputs = SimulatorInputs { years_projection: 0, ..SimulatorInputs::default() };
        let report = simulate(&inputs);
        assert_eq!(report.office_savings, 0.0);
        assert_eq!(report.roi_months, None);
    }

    #[test]
    fn test_profile_labels() {
        assert_eq!(Profile::Ecole.label(), "🏫 École primaire");
        assert_eq!(Profile::Collectivite.label(), "🏛️ Collectivité");
    }
}
