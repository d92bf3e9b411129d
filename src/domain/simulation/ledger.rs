use rust_decimal::Decimal;
use std::collections::HashMap;
use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::domain::simulation::delivery_record::DeliveryRecord;
use crate::domain::simulation::run::SimulationRun;
use crate::error::Result;

/// Target for the structured run events, so they can be routed apart from the diagnostic log.
pub const ANALYTICS_TARGET: &str = "greencart_sim::analytics";

/// Columns of the delivery ledger, in output order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LedgerColumn {
    RunId,

    /// "ORDER" for a delivery row, "SUMMARY" for the closing run row.
    RowKind,

    OrderId,
    DriverId,
    RouteId,
    TrafficLevel,
    ValueRs,

    /// Minutes after route start the driver picked the order up.
    StartOffsetMinutes,
    DurationMinutes,
    DeliveredAt,
    OnTime,
    Bonus,
    Penalty,
    FuelCost,
    Profit,

    // Summary only
    TotalDeliveries,
    OnTimeDeliveries,
    EfficiencyScore,
}

impl LedgerColumn {
    pub const ALL: [LedgerColumn; 18] = [
        LedgerColumn::RunId,
        LedgerColumn::RowKind,
        LedgerColumn::OrderId,
        LedgerColumn::DriverId,
        LedgerColumn::RouteId,
        LedgerColumn::TrafficLevel,
        LedgerColumn::ValueRs,
        LedgerColumn::StartOffsetMinutes,
        LedgerColumn::DurationMinutes,
        LedgerColumn::DeliveredAt,
        LedgerColumn::OnTime,
        LedgerColumn::Bonus,
        LedgerColumn::Penalty,
        LedgerColumn::FuelCost,
        LedgerColumn::Profit,
        LedgerColumn::TotalDeliveries,
        LedgerColumn::OnTimeDeliveries,
        LedgerColumn::EfficiencyScore,
    ];

    pub fn header(self) -> &'static str {
        match self {
            LedgerColumn::RunId => "RunId",
            LedgerColumn::RowKind => "RowKind",
            LedgerColumn::OrderId => "OrderId",
            LedgerColumn::DriverId => "DriverId",
            LedgerColumn::RouteId => "RouteId",
            LedgerColumn::TrafficLevel => "TrafficLevel",
            LedgerColumn::ValueRs => "ValueRs",
            LedgerColumn::StartOffsetMinutes => "StartOffsetMinutes",
            LedgerColumn::DurationMinutes => "DurationMinutes",
            LedgerColumn::DeliveredAt => "DeliveredAt",
            LedgerColumn::OnTime => "OnTime",
            LedgerColumn::Bonus => "Bonus",
            LedgerColumn::Penalty => "Penalty",
            LedgerColumn::FuelCost => "FuelCost",
            LedgerColumn::Profit => "Profit",
            LedgerColumn::TotalDeliveries => "TotalDeliveries",
            LedgerColumn::OnTimeDeliveries => "OnTimeDeliveries",
            LedgerColumn::EfficiencyScore => "EfficiencyScore",
        }
    }

    pub fn headers() -> Vec<&'static str> {
        Self::ALL.iter().map(|column| column.header()).collect()
    }
}

/// Cell values stay typed until the row is written.
#[derive(Debug, Clone, PartialEq)]
pub enum LedgerValue {
    Integer(i64),
    Amount(Decimal),
    Text(String),
    Bool(bool),
}

impl From<i64> for LedgerValue {
    fn from(v: i64) -> Self {
        LedgerValue::Integer(v)
    }
}

impl From<usize> for LedgerValue {
    fn from(v: usize) -> Self {
        LedgerValue::Integer(i64::try_from(v).unwrap_or(i64::MAX))
    }
}

impl From<Decimal> for LedgerValue {
    fn from(v: Decimal) -> Self {
        LedgerValue::Amount(v)
    }
}

impl From<String> for LedgerValue {
    fn from(v: String) -> Self {
        LedgerValue::Text(v)
    }
}

impl From<&str> for LedgerValue {
    fn from(v: &str) -> Self {
        LedgerValue::Text(v.to_string())
    }
}

impl From<bool> for LedgerValue {
    fn from(v: bool) -> Self {
        LedgerValue::Bool(v)
    }
}

impl LedgerValue {
    fn render(&self) -> String {
        match self {
            LedgerValue::Integer(i) => i.to_string(),
            LedgerValue::Amount(d) => d.normalize().to_string(),
            LedgerValue::Text(t) => t.clone(),
            LedgerValue::Bool(b) => b.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct LedgerRow {
    cells: HashMap<LedgerColumn, LedgerValue>,
}

impl LedgerRow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set<V: Into<LedgerValue>>(&mut self, column: LedgerColumn, value: V) -> &mut Self {
        self.cells.insert(column, value.into());
        self
    }

    pub fn get(&self, column: LedgerColumn) -> Option<&LedgerValue> {
        self.cells.get(&column)
    }

    /// Cells in column order, "NA" where nothing was set.
    fn to_record(&self) -> Vec<String> {
        LedgerColumn::ALL.iter().map(|column| self.get(*column).map_or_else(|| "NA".to_string(), LedgerValue::render)).collect()
    }
}

fn delivery_row(run: &SimulationRun, delivery: &DeliveryRecord) -> LedgerRow {
    let financials = &delivery.financials;
    let mut row = LedgerRow::new();
    row.set(LedgerColumn::RunId, run.id.as_str())
        .set(LedgerColumn::RowKind, "ORDER")
        .set(LedgerColumn::OrderId, delivery.order_code.as_str())
        .set(LedgerColumn::DriverId, delivery.driver_id.as_str())
        .set(LedgerColumn::RouteId, delivery.route_id.as_str())
        .set(LedgerColumn::TrafficLevel, delivery.traffic_level.to_string())
        .set(LedgerColumn::ValueRs, delivery.value_rs)
        .set(LedgerColumn::StartOffsetMinutes, delivery.start_offset_minutes)
        .set(LedgerColumn::DurationMinutes, delivery.duration_minutes)
        .set(LedgerColumn::DeliveredAt, delivery.delivered_at.format("%Y-%m-%dT%H:%M:%S").to_string())
        .set(LedgerColumn::OnTime, financials.delivered_on_time)
        .set(LedgerColumn::Bonus, financials.bonus)
        .set(LedgerColumn::Penalty, financials.penalty)
        .set(LedgerColumn::FuelCost, financials.fuel_cost)
        .set(LedgerColumn::Profit, financials.profit);
    row
}

fn summary_row(run: &SimulationRun) -> LedgerRow {
    let kpis = &run.kpis;
    let mut row = LedgerRow::new();
    row.set(LedgerColumn::RunId, run.id.as_str())
        .set(LedgerColumn::RowKind, "SUMMARY")
        .set(LedgerColumn::Bonus, kpis.total_bonuses)
        .set(LedgerColumn::Penalty, kpis.total_penalties)
        .set(LedgerColumn::FuelCost, kpis.total_fuel_cost)
        .set(LedgerColumn::Profit, kpis.total_profit)
        .set(LedgerColumn::TotalDeliveries, kpis.total_deliveries)
        .set(LedgerColumn::OnTimeDeliveries, kpis.on_time_deliveries)
        .set(LedgerColumn::EfficiencyScore, kpis.display_efficiency());
    row
}

/// Writes one `;`-separated row per delivery followed by a summary row for the run.
pub fn write_ledger<W: Write>(writer: W, run: &SimulationRun, deliveries: &[DeliveryRecord]) -> Result<()> {
    let mut csv_wtr = csv::WriterBuilder::new().delimiter(b';').from_writer(writer);

    csv_wtr.write_record(LedgerColumn::headers())?;
    for delivery in deliveries {
        csv_wtr.write_record(delivery_row(run, delivery).to_record())?;
    }
    csv_wtr.write_record(summary_row(run).to_record())?;

    csv_wtr.flush()?;
    Ok(())
}

pub fn export_ledger(file_path: impl AsRef<Path>, run: &SimulationRun, deliveries: &[DeliveryRecord]) -> Result<()> {
    let file_path = file_path.as_ref();
    let file = File::create(file_path)?;
    write_ledger(file, run, deliveries)?;
    log::info!("Wrote ledger for run {} ({} deliveries) to '{}'.", run.id, deliveries.len(), file_path.display());
    Ok(())
}
