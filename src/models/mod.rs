pub mod category;
pub mod envelope;
pub mod lenient;
pub mod transaction;
pub mod user;

pub use category::{Category, CategoryType, CategoryUpdate, NewCategory};
pub use envelope::{Envelope, ErrorBody};
pub use transaction::{
    CategoryRef, NewTransaction, Transaction, TransactionQuery, TransactionUpdate,
    TransactionWithCategory,
};
pub use user::{AuthPayload, CurrentUser, LoginCredentials, RegisterCredentials, User};
