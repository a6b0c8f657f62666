//! Templated-file rendering
//!
//! - `descriptor`: discovery of template-marker files under a source root
//! - `args`: args files and their combination into per-template arguments
//! - `registry`: native render functions keyed by template id
//! - `operation`: a rendered template waiting to be written
//! - `processor`: turns descriptors into rendered output

pub mod args;
pub mod descriptor;
pub mod operation;
pub mod processor;
pub mod registry;

pub use args::{ArgsFile, CombinedArgs};
pub use descriptor::TemplateDescriptor;
pub use operation::RenderedTemplate;
pub use processor::TemplateProcessor;
pub use registry::TemplateRegistry;
