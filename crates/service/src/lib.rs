//! Service layer owning the Company/Employee lifecycle and their
//! many-to-many association.
//! - Repositories are the only path to the database; raw `DbErr` stops here.
//! - The two services are deliberate near-mirrors of each other.

pub mod company;
pub mod employee;
pub mod errors;
pub mod pagination;
#[cfg(test)]
pub mod test_support;
