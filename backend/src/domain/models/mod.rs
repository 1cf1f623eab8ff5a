//! Domain models. Dates are real `NaiveDate`s here; the `shared` DTOs carry
//! them as `YYYY-MM-DD` strings and the REST mappers convert between the two.

pub mod growth;
pub mod journal;
pub mod milestone;
pub mod profile;
pub mod vaccination;
