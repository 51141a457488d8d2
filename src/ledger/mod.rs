pub mod referral;

pub use referral::ReferralLedger;
