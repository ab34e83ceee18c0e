pub mod capital_gains;

pub use capital_gains::{
    estimate_capital_gains_tax, tax_regimes, InvestmentKind, TaxInput, TaxRegime, TaxResult,
    CAPITAL_GAINS_RATE,
};
