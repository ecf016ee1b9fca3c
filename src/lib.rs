//! Look-and-say — generalized look-and-say sequences and their chemistry
//!
//! Strings evolve by run-length encoding their predecessor under a pluggable
//! [`SayRule`]. A [`SplitRule`] cuts evolved strings into chunks, and a
//! [`Chemistry`] collects the chunks that persist forever (the elements),
//! relating them through a decay matrix whose spectrum gives the growth rate
//! of the sequence and the limiting abundance of each element.

pub mod chemistry;
pub mod cosmology;
pub mod error;
pub mod polynomial;
pub mod say;
pub mod split;

pub use chemistry::{Chemistry, DiscoveryLimits, Element, ElementOrder, PeriodicTable};
pub use cosmology::{Cosmology, CosmologyLimits};
pub use error::{LookAndSayError, Result};
pub use polynomial::{CharacteristicPolynomial, Factor, Factorization, IntPolynomial};
pub use say::{LookAndSay, RuleId, SayRule};
pub use split::{split_conway, SplitFactory, SplitRule};
