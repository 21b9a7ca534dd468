//! Fixed-arity tuple fields.
//!
//! Each block is a JSON array with an exact number of elements, e.g. a cost
//! block is `[marginal_cost, block_size]`.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::numeric::Real;

/// `[marginal cost ($/p.u.-hr), block size (p.u.)]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CostBlock(pub Real, pub Real);

impl CostBlock {
    pub fn marginal_cost(&self) -> Real {
        self.0
    }

    pub fn size(&self) -> Real {
        self.1
    }
}

/// `[startup cost adjustment ($), maximum down time (hr)]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct StartupState(pub Real, pub Real);

impl StartupState {
    pub fn cost_adjustment(&self) -> Real {
        self.0
    }

    pub fn max_down_time(&self) -> Real {
        self.1
    }
}

/// `[interval start (hr), interval end (hr), maximum startups within the interval]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct StartupWindow(pub Real, pub Real, pub i64);

/// `[interval start (hr), interval end (hr), energy (p.u.)]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct EnergyWindow(pub Real, pub Real, pub Real);

/// A time interval carrying a limit over that interval.
pub trait Window {
    fn start(&self) -> Real;
    fn end(&self) -> Real;
    /// Limit as a real so count and quantity windows share one check.
    fn limit(&self) -> Real;
}

impl Window for StartupWindow {
    fn start(&self) -> Real {
        self.0
    }

    fn end(&self) -> Real {
        self.1
    }

    fn limit(&self) -> Real {
        self.2 as Real
    }
}

impl Window for EnergyWindow {
    fn start(&self) -> Real {
        self.0
    }

    fn end(&self) -> Real {
        self.1
    }

    fn limit(&self) -> Real {
        self.2
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blocks_are_json_arrays() {
        let block: CostBlock = serde_json::from_str("[12.5, 0.4]").unwrap();
        assert_eq!(block.marginal_cost(), 12.5);
        assert_eq!(block.size(), 0.4);
        assert_eq!(serde_json::to_string(&block).unwrap(), "[12.5,0.4]");
    }

    #[test]
    fn arity_is_exact() {
        assert!(serde_json::from_str::<CostBlock>("[1.0]").is_err());
        assert!(serde_json::from_str::<CostBlock>("[1.0, 2.0, 3.0]").is_err());
        assert!(serde_json::from_str::<StartupWindow>("[0.0, 24.0]").is_err());
    }

    #[test]
    fn startup_window_count_is_strict_integer() {
        let window: StartupWindow = serde_json::from_str("[0.0, 24.0, 2]").unwrap();
        assert_eq!(window.limit(), 2.0);
        assert!(serde_json::from_str::<StartupWindow>("[0.0, 24.0, 2.5]").is_err());
    }
}
