// Dashboard layout: surface keys, KPI tiles and appointment categories
use super::format::ValueFormat;

pub const KPI_TOTAL_PATIENTS: &str = "kpi_total_patients";
pub const KPI_TOTAL_DOCTORS: &str = "kpi_total_doctors";
pub const KPI_APPOINTMENTS_TODAY: &str = "kpi_appointments_today";
pub const KPI_REVENUE_MONTH: &str = "kpi_revenue_month";
pub const KPI_BED_OCCUPANCY: &str = "kpi_bed_occupancy";
pub const KPI_ACTIVE_ADMISSIONS: &str = "kpi_active_admissions";

pub const APPOINTMENT_CHART: &str = "appointmentChart";
pub const REVENUE_CHART: &str = "revenueChart";
pub const DEPARTMENT_CHART: &str = "departmentChart";

/// Every surface the controller mounts into its host.
pub const ALL_SURFACES: [&str; 9] = [
    KPI_TOTAL_PATIENTS,
    KPI_TOTAL_DOCTORS,
    KPI_APPOINTMENTS_TODAY,
    KPI_REVENUE_MONTH,
    KPI_BED_OCCUPANCY,
    KPI_ACTIVE_ADMISSIONS,
    APPOINTMENT_CHART,
    REVENUE_CHART,
    DEPARTMENT_CHART,
];

/// A KPI label: which snapshot field feeds which surface, and how it prints.
#[derive(Debug, Clone, Copy)]
pub struct KpiTile {
    pub surface: &'static str,
    pub field: &'static str,
    pub format: ValueFormat,
}

pub const KPI_TILES: [KpiTile; 6] = [
    KpiTile {
        surface: KPI_TOTAL_PATIENTS,
        field: "total_patients",
        format: ValueFormat::Count,
    },
    KpiTile {
        surface: KPI_TOTAL_DOCTORS,
        field: "total_doctors",
        format: ValueFormat::Count,
    },
    KpiTile {
        surface: KPI_APPOINTMENTS_TODAY,
        field: "total_appointments_today",
        format: ValueFormat::Count,
    },
    KpiTile {
        surface: KPI_REVENUE_MONTH,
        field: "total_revenue_month",
        format: ValueFormat::Currency { decimals: 2 },
    },
    KpiTile {
        surface: KPI_BED_OCCUPANCY,
        field: "bed_occupancy_rate",
        format: ValueFormat::Percent { decimals: 1 },
    },
    KpiTile {
        surface: KPI_ACTIVE_ADMISSIONS,
        field: "total_admissions_active",
        format: ValueFormat::Count,
    },
];

/// Snapshot fields requested for the KPI panel.
pub fn kpi_fields() -> Vec<&'static str> {
    KPI_TILES.iter().map(|t| t.field).collect()
}

/// Appointment states in pie order. The order and colours never depend on
/// the response, so a category keeps its colour across refreshes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AppointmentState {
    Draft,
    Confirmed,
    Done,
    Cancel,
}

impl AppointmentState {
    pub const ORDERED: [AppointmentState; 4] = [
        AppointmentState::Draft,
        AppointmentState::Confirmed,
        AppointmentState::Done,
        AppointmentState::Cancel,
    ];

    pub fn field(&self) -> &'static str {
        match self {
            AppointmentState::Draft => "draft",
            AppointmentState::Confirmed => "confirmed",
            AppointmentState::Done => "done",
            AppointmentState::Cancel => "cancel",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AppointmentState::Draft => "Draft",
            AppointmentState::Confirmed => "Confirmed",
            AppointmentState::Done => "Done",
            AppointmentState::Cancel => "Cancelled",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            AppointmentState::Draft => "#fbbf24",     // amber
            AppointmentState::Confirmed => "#3b82f6", // blue
            AppointmentState::Done => "#10b981",      // green
            AppointmentState::Cancel => "#ef4444",    // red
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kpi_surfaces_are_mounted() {
        for tile in KPI_TILES {
            assert!(ALL_SURFACES.contains(&tile.surface));
        }
        assert_eq!(kpi_fields().len(), 6);
    }

    #[test]
    fn test_appointment_order() {
        let fields: Vec<_> = AppointmentState::ORDERED.iter().map(|s| s.field()).collect();
        assert_eq!(fields, vec!["draft", "confirmed", "done", "cancel"]);
        assert_eq!(AppointmentState::Confirmed.color(), "#3b82f6");
    }
}
