//! Data layer: record model, loading, filtering and aggregation.
//!
//! Architecture:
//! ```text
//!  .json / .csv / bundled sample
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  loader  │  parse + sanity-check → Vec<SalesRecord>
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  filter  │  date range + category → filtered snapshot
//!   └──────────┘
//!        │
//!        ├──────────────┬──────────────┐
//!        ▼              ▼              ▼
//!   time series    category sums   region sums     (aggregate)
//! ```

pub mod aggregate;
pub mod filter;
pub mod loader;
pub mod model;
