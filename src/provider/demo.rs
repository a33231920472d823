//! Simulated vehicle feed: ECU, GPS and accelerometer readings.
//!
//! Values follow smooth periodic curves of the tick counter, so the feed is
//! deterministic. Some keys never change, which keeps them off the pulse path.

use chrono::Utc;

use super::{ProviderError, SnapshotProvider};
use crate::model::{Snapshot, Value};

/// Scale factors of the ECU's CAN frames.
const PRESSURE_LSB: f64 = 0.0625;
const BATT_LSB: f64 = 0.027;
const LAMBDA_LSB: f64 = 0.0078125;

/// Starting position of the simulated GPS track.
const START_LAT: f64 = 37.5665;
const START_LON: f64 = 126.978;

/// Provider generating one synthetic snapshot per advance.
#[derive(Debug)]
pub struct DemoProvider {
    tick: u64,
    session_id: String,
    current: Option<Snapshot>,
}

impl DemoProvider {
    pub fn new() -> Self {
        Self {
            tick: 0,
            session_id: Utc::now().format("%Y%m%d_%H%M%S").to_string(),
            current: None,
        }
    }

    /// Builds the snapshot for tick `t` without the wall-clock keys.
    pub fn sample(t: u64) -> Snapshot {
        let x = t as f64;
        let wave = |period: f64| (x * std::f64::consts::TAU / period).sin();
        let quantize = |v: f64, lsb: f64| (v / lsb).round() * lsb;

        let rpm = (3200.0 + 2400.0 * wave(23.0) + 300.0 * wave(5.0)).round();
        let speed = (60.0 + 45.0 * wave(31.0)).max(0.0).round();
        let gear = match speed as u32 {
            0..=15 => 1.0,
            16..=35 => 2.0,
            36..=60 => 3.0,
            61..=85 => 4.0,
            _ => 5.0,
        };
        // Coolant warms up, then swings around the warning threshold
        let clt = (70.0 + x.min(40.0) + 8.0 * wave(47.0)).round();

        let mut s = Snapshot::new();
        s.insert("RPM", rpm);
        s.insert("TPS_percent", quantize(35.0 + 30.0 * wave(23.0), 0.5));
        s.insert("IAT_C", (32.0 + 4.0 * wave(61.0)).round());
        s.insert("MAP_kPa", (100.0 + 60.0 * wave(23.0)).round());
        s.insert("PulseWidth_ms", quantize(4.0 + 1.5 * wave(23.0), 0.016129));
        s.insert("VSS_kmh", speed);
        s.insert("Baro_kPa", 101.0);
        s.insert("OilTemp_C", (85.0 + x.min(30.0) + 5.0 * wave(53.0)).round());
        s.insert("OilPressure_bar", quantize(3.5 + 1.5 * wave(23.0), PRESSURE_LSB));
        s.insert("FuelPressure_bar", quantize(3.0 + 0.1 * wave(7.0), PRESSURE_LSB));
        s.insert("CLT_C", clt);
        s.insert("IgnAngle_deg", quantize(18.0 + 6.0 * wave(23.0), 0.5));
        s.insert("WBO_Lambda", quantize(0.95 + 0.08 * wave(11.0), LAMBDA_LSB));
        s.insert("EGT1_C", (650.0 + 150.0 * wave(23.0)).round());
        s.insert("Gear", gear);
        s.insert("EmuTemp_C", 45.0);
        s.insert("Batt_V", quantize(13.8 + 0.3 * wave(17.0), BATT_LSB));
        s.insert("CEL_Error", 0.0);
        s.insert("Ethanol_percent", 10.0);
        s.insert("DSG_Mode", "D");
        s.insert("lat", START_LAT + x * 0.00001);
        s.insert("lon", START_LON + x * 0.000015);
        s.insert("gps_fix", 1.0);
        s.insert("acc_x", quantize(0.3 * wave(9.0), 0.001));
        s.insert("acc_y", quantize(0.2 * wave(13.0), 0.001));
        s.insert("acc_z", quantize(1.0 + 0.02 * wave(3.0), 0.001));
        s
    }
}

impl Default for DemoProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl SnapshotProvider for DemoProvider {
    fn current(&self) -> Option<&Snapshot> {
        self.current.as_ref()
    }

    fn advance(&mut self) -> Option<&Snapshot> {
        let mut snapshot = Self::sample(self.tick);
        snapshot.insert("timestamp", Value::from(Utc::now().timestamp_millis()));
        snapshot.insert("session_id", self.session_id.as_str());
        self.tick += 1;
        self.current = Some(snapshot);
        self.current.as_ref()
    }

    fn last_error(&self) -> Option<&ProviderError> {
        None
    }

    fn name(&self) -> &str {
        "demo"
    }
}
