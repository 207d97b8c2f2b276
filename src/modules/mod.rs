pub mod accounts;
pub mod compliance;
pub mod partners;
pub mod review;
pub mod sections;
pub mod submissions;
