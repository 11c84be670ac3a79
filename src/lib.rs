//! Inventory and revenue analytics engine for a perishable-goods storefront
//!
//! Pure calculation routines that turn product, order, and spoilage records
//! into decision-support numbers: discount-resolved prices, demand
//! forecasts, reorder recommendations, spoilage risk scores, ABC revenue
//! segmentation, and dashboard KPIs. The caller loads a consistent snapshot
//! of its data, passes it in by reference together with the evaluation
//! instant, and persists whatever it wants from the results. Nothing here
//! reads a clock, touches storage, or mutates its inputs.

pub mod demand;
pub mod forecast;
pub mod kpi;
pub mod models;
pub mod pricing;
pub mod segmentation;
pub mod smoothing;
pub mod spoilage;
pub mod validation;

pub use demand::*;
pub use forecast::*;
pub use kpi::*;
pub use models::*;
pub use pricing::*;
pub use segmentation::*;
pub use smoothing::*;
pub use spoilage::*;
pub use validation::*;
