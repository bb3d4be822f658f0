//! Telemetry sinks
//!
//! [`CsvTelemetry`] writes the three run logs:
//!
//! | File          | Columns                                          |
//! |---------------|--------------------------------------------------|
//! | `prices.csv`  | `step,mid_price,best_bid,best_ask`               |
//! | `actions.csv` | `step,agent_id,type,side,price,quantity`         |
//! | `pnl.csv`     | `step,agent_id,inventory,cash,total_value`       |
//!
//! Headers are written on creation so a run that produces no rows still
//! leaves well-formed files behind. [`MemoryTelemetry`] keeps the same
//! records in vectors.

use agora_ports::{
    ActionRecord, MarketRecord, PortfolioRecord, TelemetryError, TelemetryResult, TelemetrySink,
};
use csv::{Writer, WriterBuilder};
use log::info;
use serde::Serialize;
use std::fs::File;
use std::path::{Path, PathBuf};

pub const PRICES_FILE: &str = "prices.csv";
pub const ACTIONS_FILE: &str = "actions.csv";
pub const PNL_FILE: &str = "pnl.csv";

const PRICES_HEADER: [&str; 4] = ["step", "mid_price", "best_bid", "best_ask"];
const ACTIONS_HEADER: [&str; 6] = ["step", "agent_id", "type", "side", "price", "quantity"];
const PNL_HEADER: [&str; 5] = ["step", "agent_id", "inventory", "cash", "total_value"];

fn encode_error(e: csv::Error) -> TelemetryError {
    TelemetryError::Encode(e.to_string())
}

fn open_log(path: &Path, header: &[&str]) -> TelemetryResult<Writer<File>> {
    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .map_err(encode_error)?;
    writer.write_record(header).map_err(encode_error)?;
    Ok(writer)
}

fn write_row<T: Serialize>(writer: &mut Writer<File>, record: &T) -> TelemetryResult<()> {
    writer.serialize(record).map_err(encode_error)
}

/// CSV files in one output directory
pub struct CsvTelemetry {
    dir: PathBuf,
    prices: Writer<File>,
    actions: Writer<File>,
    pnl: Writer<File>,
}

impl CsvTelemetry {
    /// Create the directory (if needed) and truncate the three log files
    pub fn create(dir: impl AsRef<Path>) -> TelemetryResult<Self> {
        let dir = dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&dir)?;

        let prices = open_log(&dir.join(PRICES_FILE), &PRICES_HEADER)?;
        let actions = open_log(&dir.join(ACTIONS_FILE), &ACTIONS_HEADER)?;
        let pnl = open_log(&dir.join(PNL_FILE), &PNL_HEADER)?;

        info!("Writing telemetry to {}", dir.display());
        Ok(Self {
            dir,
            prices,
            actions,
            pnl,
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl TelemetrySink for CsvTelemetry {
    fn record_market(&mut self, record: &MarketRecord) -> TelemetryResult<()> {
        write_row(&mut self.prices, record)
    }

    fn record_action(&mut self, record: &ActionRecord) -> TelemetryResult<()> {
        write_row(&mut self.actions, record)
    }

    fn record_portfolio(&mut self, record: &PortfolioRecord) -> TelemetryResult<()> {
        write_row(&mut self.pnl, record)
    }

    fn flush(&mut self) -> TelemetryResult<()> {
        self.prices.flush()?;
        self.actions.flush()?;
        self.pnl.flush()?;
        Ok(())
    }
}

impl std::fmt::Debug for CsvTelemetry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CsvTelemetry").field("dir", &self.dir).finish()
    }
}

/// In-memory sink, mostly for tests and embedding
#[derive(Debug, Clone, Default)]
pub struct MemoryTelemetry {
    pub markets: Vec<MarketRecord>,
    pub actions: Vec<ActionRecord>,
    pub portfolios: Vec<PortfolioRecord>,
}

impl MemoryTelemetry {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TelemetrySink for MemoryTelemetry {
    fn record_market(&mut self, record: &MarketRecord) -> TelemetryResult<()> {
        self.markets.push(record.clone());
        Ok(())
    }

    fn record_action(&mut self, record: &ActionRecord) -> TelemetryResult<()> {
        self.actions.push(record.clone());
        Ok(())
    }

    fn record_portfolio(&mut self, record: &PortfolioRecord) -> TelemetryResult<()> {
        self.portfolios.push(record.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agora_core::{Action, AgentId, MarketState, Portfolio};
    use rust_decimal_macros::dec;

    fn read(dir: &Path, file: &str) -> String {
        std::fs::read_to_string(dir.join(file)).unwrap()
    }

    #[test]
    fn test_headers_written_on_create() {
        let tmp = tempfile::tempdir().unwrap();
        let mut sink = CsvTelemetry::create(tmp.path()).unwrap();
        sink.flush().unwrap();

        assert_eq!(read(tmp.path(), PRICES_FILE), "step,mid_price,best_bid,best_ask\n");
        assert_eq!(
            read(tmp.path(), ACTIONS_FILE),
            "step,agent_id,type,side,price,quantity\n"
        );
        assert_eq!(
            read(tmp.path(), PNL_FILE),
            "step,agent_id,inventory,cash,total_value\n"
        );
    }

    #[test]
    fn test_rows_follow_headers() {
        let tmp = tempfile::tempdir().unwrap();
        let mut sink = CsvTelemetry::create(tmp.path().join("logs")).unwrap();

        let state = MarketState::theoretical(1, dec!(100.5), dec!(0.1));
        sink.record_market(&MarketRecord::new(0, &state)).unwrap();
        sink.record_action(&ActionRecord::new(
            0,
            AgentId::new("Trend_01"),
            &Action::market_buy(5),
        ))
        .unwrap();
        sink.record_action(&ActionRecord::new(
            0,
            AgentId::new("MM_01"),
            &Action::limit_buy(dec!(99.9), 10),
        ))
        .unwrap();
        sink.record_portfolio(&PortfolioRecord::new(
            0,
            AgentId::new("MM_01"),
            &Portfolio::default(),
            dec!(100.5),
        ))
        .unwrap();
        sink.flush().unwrap();

        let dir = tmp.path().join("logs");
        let prices = read(&dir, PRICES_FILE);
        assert_eq!(prices.lines().nth(1), Some("0,100.5,100.45,100.55"));

        let actions: Vec<_> = read(&dir, ACTIONS_FILE).lines().map(String::from).collect();
        assert_eq!(actions[1], "0,Trend_01,market,buy,MKT,5");
        assert_eq!(actions[2], "0,MM_01,limit,buy,99.9,10");

        let pnl = read(&dir, PNL_FILE);
        let row: Vec<_> = pnl.lines().nth(1).unwrap().split(',').collect();
        assert_eq!(row[..4], ["0", "MM_01", "0", "100000"]);
        assert_eq!(row[4].parse::<rust_decimal::Decimal>().unwrap(), dec!(100000));
    }

    #[test]
    fn test_memory_sink_collects() {
        let mut sink = MemoryTelemetry::new();
        let state = MarketState::theoretical(1, dec!(100), dec!(0.1));
        sink.record_market(&MarketRecord::new(0, &state)).unwrap();
        sink.flush().unwrap();

        assert_eq!(sink.markets.len(), 1);
        assert!(sink.actions.is_empty());
    }
}
