mod bank_account;
mod location;
mod profile;
mod record_id;
mod user;

pub use bank_account::{mask_account_number, AccountType, BankAccount};
pub use location::{Location, DEFAULT_COUNTRY};
pub use profile::{CompanyProfile, ProfileDraft};
pub use record_id::RecordId;
pub use user::{CurrentUser, Role};
