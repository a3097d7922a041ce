//! Equiv equality-contract verifier
//!
//! This crate checks that the `equals` and `hashCode` behaviour of a class
//! honours the equality contract: reflexivity, symmetry, transitivity,
//! consistency, non-nullity, agreement between `equals` and `hashCode`,
//! correct use of significant fields and sound behaviour across the class
//! hierarchy.

pub mod annotations;
pub mod checks;
pub mod config;
pub mod errors;
pub mod fields;
pub mod instantiator;
pub mod mutator;
pub mod parallel;
pub mod prefab;
pub mod relaxed;
pub mod report;
pub mod verifier;

pub use annotations::{FieldCapability, FieldMetadataTable, MetadataLookup, MetadataProvider};
pub use checks::{CheckContext, CheckFn, PIPELINE};
pub use config::{Configuration, FieldSelection, VerifierSettings, Warning};
pub use errors::{CheckKind, ThrownExt, VerifierError, VerifierResult, Violation};
pub use fields::{Classification, FieldAccessor, FieldDescriptor, FieldModel};
pub use instantiator::{
    AllocationStrategy, DefaultConstructorStrategy, ExampleStrategy, InstantiationStrategy,
    Instantiator, SubclassFactory, SubclassStrategy,
};
pub use mutator::{FieldMutation, Mutator};
pub use parallel::{ParallelVerificationConfig, ParallelVerifier};
pub use prefab::{PrefabEntry, PrefabRepository, Tint};
pub use relaxed::RelaxedVerifier;
pub use report::{describe, CollectingSink, ReportSink, TracingSink, VerificationReport};
pub use verifier::ContractVerifier;

/// Prelude module for common imports
pub mod prelude {
    pub use crate::{
        Configuration, ContractVerifier, FieldCapability, FieldMetadataTable, RelaxedVerifier,
        VerificationReport, VerifierError, VerifierResult, VerifierSettings, Violation, Warning,
    };
    pub use equiv_core::prelude::*;
}
