mod correlator;
mod engine;
mod introspect;
mod prober;
mod registry;
mod renderer;
mod resolver;
mod snapshot;
mod transactions;

pub use correlator::{ResolvedMethod, SignatureCorrelator};
pub use introspect::{
    FieldDescriptor, MethodDescriptor, TypeDescriptor, TypeIntrospector, TypeRef,
};
pub use prober::NamespaceProber;
pub use registry::{ServiceHandle, ServiceRegistry};
pub use renderer::{render, simplify_type, RenderFilter};
pub use resolver::method_name_for_transaction;
pub use snapshot::{MetadataSnapshot, SnapshotService};
pub use transactions::{extract_transactions, looks_like_transaction_code};

// Export the main engine
pub use engine::{Engine, Reconstruction};
