use crate::infra::{load_snapshot, parse_as_of, parse_date, InMemoryFleetRepository};
use chrono::{DateTime, Duration, NaiveDate, Utc};
use clap::Args;
use fleet_ops::error::AppError;
use fleet_ops::fleet::import::FleetSnapshot;
use fleet_ops::fleet::utilization::{
    FleetUtilization, FleetUtilizationReport, FleetUtilizationService, RangeKeyword,
    RangeSelection, Window, MAX_FLEET_UTIL_SCORE, MISSING_DATES_BEHAVIOR,
};
use fleet_ops::fleet::{CompanyId, Load, LoadId, Truck, TruckId};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;

const DEMO_COMPANY: &str = "demo-freight";

/// Unit number, status, and revenue days for two months ago, last month, and this month.
const DEMO_FLEET: [(&str, &str, [i64; 3]); 6] = [
    ("Unit 101", "ACTIVE", [16, 18, 21]),
    ("Unit 102", "ACTIVE", [15, 17, 20]),
    ("Unit 103", "ACTIVE", [12, 14, 19]),
    ("Unit 104", "ACTIVE", [10, 12, 16]),
    ("Unit 105", "IN_SHOP", [8, 6, 6]),
    ("Unit 106", "ACTIVE", [14, 16, 18]),
];

#[derive(Args, Debug)]
pub(crate) struct UtilizationArgs {
    /// Trucks export (company_id,id,unit_number,status)
    #[arg(long)]
    pub(crate) trucks: PathBuf,
    /// Loads export (company_id,id,truck_id,pickup_date,delivery_date,deleted)
    #[arg(long)]
    pub(crate) loads: PathBuf,
    /// Company whose fleet is scored
    #[arg(long)]
    pub(crate) company: String,
    /// Range keyword: month, 90d, 180d, or 1y. Unknown values report the current month.
    #[arg(long)]
    pub(crate) range: Option<String>,
    /// First day of a custom range (YYYY-MM-DD); overrides --range
    #[arg(long, value_parser = parse_date, requires = "to")]
    pub(crate) from: Option<NaiveDate>,
    /// Last day of a custom range (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date, requires = "from")]
    pub(crate) to: Option<NaiveDate>,
    /// Evaluate as of this date or RFC 3339 timestamp (defaults to now)
    #[arg(long, value_parser = parse_as_of)]
    pub(crate) as_of: Option<DateTime<Utc>>,
    /// Print the JSON breakdown instead of the text report
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Evaluate as of this date or RFC 3339 timestamp (defaults to now)
    #[arg(long, value_parser = parse_as_of)]
    pub(crate) as_of: Option<DateTime<Utc>>,
    /// Range keyword: month, 90d, 180d, or 1y
    #[arg(long)]
    pub(crate) range: Option<String>,
    /// Print the JSON breakdown instead of the text report
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct UtilizationOutput {
    company: CompanyId,
    as_of: DateTime<Utc>,
    #[serde(flatten)]
    report: FleetUtilizationReport,
}

pub(crate) fn run_fleet_utilization(args: UtilizationArgs) -> Result<(), AppError> {
    let UtilizationArgs {
        trucks,
        loads,
        company,
        range,
        from,
        to,
        as_of,
        json,
    } = args;

    let company = CompanyId(company.trim().to_string());
    let as_of = as_of.unwrap_or_else(Utc::now);
    let range = resolve_range(range.as_deref(), from, to)?;

    let snapshot = load_snapshot(Some(trucks), Some(loads))?;
    let repository = InMemoryFleetRepository::from_snapshot(snapshot);
    if !repository.knows_company(&company) {
        return Err(AppError::Input(format!(
            "company '{company}' has no trucks or loads in the export"
        )));
    }

    let service = FleetUtilizationService::new(Arc::new(repository));
    let utilization = service.utilization(&company, range, as_of)?;
    print_utilization(&company, as_of, &utilization, json)
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        as_of,
        range,
        json,
    } = args;

    let as_of = as_of.unwrap_or_else(Utc::now);
    let company = CompanyId(DEMO_COMPANY.to_string());
    let range = RangeSelection::Preset(RangeKeyword::parse(range.as_deref()));

    let repository = InMemoryFleetRepository::from_snapshot(demo_snapshot(as_of));
    let service = FleetUtilizationService::new(Arc::new(repository));
    let utilization = service.utilization(&company, range, as_of)?;

    if !json {
        println!("Fleet utilization demo (synthetic data)");
    }
    print_utilization(&company, as_of, &utilization, json)
}

fn resolve_range(
    keyword: Option<&str>,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
) -> Result<RangeSelection, AppError> {
    match (from, to) {
        (Some(first), Some(last)) => Window::days(first, last)
            .map(RangeSelection::Custom)
            .ok_or_else(|| AppError::Input(format!("--to {last} is before --from {first}"))),
        _ => Ok(RangeSelection::Preset(RangeKeyword::parse(keyword))),
    }
}

fn print_utilization(
    company: &CompanyId,
    as_of: DateTime<Utc>,
    utilization: &FleetUtilization,
    json: bool,
) -> Result<(), AppError> {
    if json {
        let output = UtilizationOutput {
            company: company.clone(),
            as_of,
            report: utilization.summary(),
        };
        match serde_json::to_string_pretty(&output) {
            Ok(body) => println!("{body}"),
            Err(err) => println!("Utilization payload unavailable: {}", err),
        }
    } else {
        println!("{}", render_utilization(company, as_of, utilization));
    }
    Ok(())
}

pub(crate) fn render_utilization(
    company: &CompanyId,
    as_of: DateTime<Utc>,
    utilization: &FleetUtilization,
) -> String {
    let metrics = &utilization.metrics;
    let consistency = &utilization.consistency;
    let trend = &utilization.trend;
    let score = &utilization.score;
    let mut lines = Vec::new();

    lines.push(format!(
        "Fleet utilization for {} as of {}",
        company,
        as_of.format("%Y-%m-%d %H:%M UTC")
    ));
    lines.push(format!(
        "- Range {}: {} to {} ({} days)",
        utilization.range,
        utilization.window.start.format("%Y-%m-%d"),
        utilization.window.end.format("%Y-%m-%d"),
        metrics.days_in_period
    ));
    lines.push(format!(
        "- Trucks: {} | low-utilization threshold {} days",
        metrics.truck_count, metrics.low_util_threshold_days
    ));
    lines.push(format!(
        "- Revenue days: {} of {} available ({:.1}% utilization)",
        metrics.total_revenue_days,
        metrics.available_days,
        metrics.utilization_rate * 100.0
    ));
    lines.push(format!(
        "- Avg revenue days per truck: {:.1}",
        metrics.avg_revenue_days_per_truck
    ));
    lines.push(format!(
        "- Low utilization: {} trucks ({:.0}%)",
        metrics.low_util_count,
        metrics.low_util_pct * 100.0
    ));

    let cv = consistency
        .cv
        .map(|cv| format!("{cv:.2}"))
        .unwrap_or_else(|| "n/a".to_string());
    lines.push(format!(
        "- Consistency: std dev {:.1} | CV {} -> {} ({:+})",
        consistency.std_dev,
        cv,
        consistency.band.label(),
        consistency.penalty
    ));

    let months = trend
        .months
        .iter()
        .map(|month| {
            format!(
                "{} {:.1}",
                month.month_start.format("%b"),
                month.avg_revenue_days_per_truck
            )
        })
        .collect::<Vec<_>>()
        .join(" | ");
    lines.push(format!(
        "- Trend: {} | slope {:+.2}/month -> {} ({:+})",
        months,
        trend.slope,
        trend.momentum.label(),
        trend.points
    ));

    let breakdown = &score.breakdown;
    lines.push(format!(
        "- Fleet utilization score: {}/{} (raw {}: pillars {}/{}/{}, consistency {:+}, trend {:+})",
        score.fleet_util_score,
        MAX_FLEET_UTIL_SCORE,
        score.raw_score,
        breakdown.pillar1,
        breakdown.pillar2,
        breakdown.pillar3,
        breakdown.pillar4,
        breakdown.pillar5
    ));

    let rows = utilization.truck_rows();
    if !rows.is_empty() {
        lines.push("Trucks:".to_string());
        for row in rows {
            let flag = if row.is_low_util { " (low)" } else { "" };
            lines.push(format!(
                "  - {} [{}]: {} days{}",
                row.unit_number, row.status, row.revenue_days, flag
            ));
        }
    }

    lines.push(format!("Note: {}", MISSING_DATES_BEHAVIOR));
    lines.join("\n")
}

/// Synthetic fleet with loads spread over the three calendar months ending with `as_of`.
pub(crate) fn demo_snapshot(as_of: DateTime<Utc>) -> FleetSnapshot {
    let company = CompanyId(DEMO_COMPANY.to_string());
    let current = Window::month_containing(as_of.date_naive());
    let last = current.previous_month();
    let months = [last.previous_month(), last, current];

    let mut trucks = Vec::with_capacity(DEMO_FLEET.len());
    let mut loads = Vec::new();

    for (index, (unit_number, status, revenue_days)) in DEMO_FLEET.iter().enumerate() {
        let truck_id = TruckId(format!("trk-{}", 101 + index));
        trucks.push(Truck {
            id: truck_id.clone(),
            company_id: company.clone(),
            unit_number: unit_number.to_string(),
            status: status.to_string(),
        });

        for (month, days) in months.iter().zip(revenue_days) {
            let pickup = month.start + Duration::days(index as i64) + Duration::hours(7);
            loads.push(Load {
                id: LoadId(format!("{}-{}", truck_id.0, month.start.format("%Y%m"))),
                company_id: company.clone(),
                truck_id: Some(truck_id.clone()),
                pickup_date: Some(pickup),
                delivery_date: Some(pickup + Duration::days(days - 1)),
                deleted: false,
            });
        }
    }

    // Skipped by the aggregator: no truck, and no dates.
    loads.push(Load {
        id: LoadId("unassigned-spot".to_string()),
        company_id: company.clone(),
        truck_id: None,
        pickup_date: Some(current.start),
        delivery_date: Some(current.start + Duration::days(3)),
        deleted: false,
    });
    loads.push(Load {
        id: LoadId("undated-backhaul".to_string()),
        company_id: company,
        truck_id: Some(TruckId("trk-101".to_string())),
        pickup_date: None,
        delivery_date: None,
        deleted: false,
    });

    FleetSnapshot { trucks, loads }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use fleet_ops::fleet::utilization::{ConsistencyBand, Momentum};

    fn as_of() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 14, 12, 0, 0)
            .single()
            .expect("valid as-of")
    }

    fn demo_utilization() -> FleetUtilization {
        let repository = InMemoryFleetRepository::from_snapshot(demo_snapshot(as_of()));
        FleetUtilizationService::new(Arc::new(repository))
            .utilization(
                &CompanyId(DEMO_COMPANY.to_string()),
                RangeSelection::Preset(RangeKeyword::Month),
                as_of(),
            )
            .expect("demo fleet scores")
    }

    #[test]
    fn demo_fleet_is_improving() {
        let utilization = demo_utilization();

        assert_eq!(utilization.metrics.truck_count, 6);
        assert_eq!(utilization.metrics.total_revenue_days, 100);
        assert_eq!(utilization.metrics.low_util_count, 2);
        assert_eq!(utilization.consistency.band, ConsistencyBand::Caution);
        assert_eq!(utilization.trend.momentum, Momentum::ImprovingStrong);
        assert_eq!(utilization.score.raw_score, 25);
        assert_eq!(utilization.score.fleet_util_score, 25);
    }

    #[test]
    fn text_report_lists_each_truck() {
        let utilization = demo_utilization();
        let rendered = render_utilization(
            &CompanyId(DEMO_COMPANY.to_string()),
            as_of(),
            &utilization,
        );

        assert!(rendered.contains("Range month: 2025-03-01 to 2025-03-31 (31 days)"));
        assert!(rendered.contains("Unit 105 [IN_SHOP]: 6 days (low)"));
        assert!(rendered.contains("Unit 101 [ACTIVE]: 21 days\n"));
        assert!(rendered.contains("Fleet utilization score: 25/25"));
        assert!(rendered.contains("Caution (-2)"));
    }

    #[test]
    fn json_output_flattens_the_report() {
        let output = UtilizationOutput {
            company: CompanyId(DEMO_COMPANY.to_string()),
            as_of: as_of(),
            report: demo_utilization().summary(),
        };
        let value = serde_json::to_value(&output).expect("serializes");

        assert_eq!(value["company"], DEMO_COMPANY);
        assert_eq!(value["range"], "month");
        assert_eq!(value["score"]["fleetUtilScore"], 25);
        assert!(value["asOf"].is_string());
    }

    #[test]
    fn custom_ranges_are_validated() {
        let first = NaiveDate::from_ymd_opt(2025, 1, 1).expect("valid");
        let last = NaiveDate::from_ymd_opt(2025, 1, 31).expect("valid");

        match resolve_range(Some("90d"), Some(first), Some(last)).expect("valid range") {
            RangeSelection::Custom(window) => assert_eq!(window.days_in_period(), 31),
            other => panic!("expected custom range, got {other:?}"),
        }
        assert!(matches!(
            resolve_range(None, Some(last), Some(first)),
            Err(AppError::Input(_))
        ));
        assert_eq!(
            resolve_range(Some("180d"), None, None).expect("keyword"),
            RangeSelection::Preset(RangeKeyword::Trailing180)
        );
    }
}
