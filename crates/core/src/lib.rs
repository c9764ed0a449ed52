//! Domain types shared across the tanmia workspace.
//!
//! Holds the scalar type aliases, the domain error enum, role constants,
//! the fixed reference enumerations (secteurs, états d'avancement,
//! provinces), decimal-amount helpers, and the field-error collection type
//! returned by payload validation.

pub mod dates;
pub mod error;
pub mod montant;
pub mod referentiel;
pub mod roles;
pub mod types;
pub mod validation;
