#[cfg(test)]
mod tests;

pub mod boosting;
pub mod dummy;
pub mod error;
pub mod forest;
pub mod hyperparams;
pub mod linear;
pub mod neighbors;
pub mod param_guard;
pub mod spec;
pub mod traits;
pub mod tree;

pub use boosting::{AdaBoostRegressor, GradientBoostingRegressor};
pub use dummy::DummyRegressor;
pub use error::EstimatorError;
pub use forest::RandomForestRegressor;
pub use hyperparams::DummyStrategy;
pub use linear::LinearRegression;
pub use neighbors::KNeighborsRegressor;
pub use param_guard::ParamGuard;
pub use spec::{FittedModel, ModelSpec};
pub use traits::{Fit, Predict};
pub use tree::DecisionTreeRegressor;
