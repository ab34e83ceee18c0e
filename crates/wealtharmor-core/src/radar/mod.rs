pub mod opportunities;

pub use opportunities::{
    compare_opportunities, investment_radar, InvestmentOpportunity, OpportunityProjection,
    RadarInput,
};
