// -------------------------------------
// #![allow(dead_code)]
// #![allow(unused_mut)]
// #![allow(unused_imports)]
// #![allow(unused_variables)]
// #![allow(clippy::single_match)]
// #![allow(clippy::collapsible_if)]
// #![allow(clippy::type_complexity)]
// -------------------------------------

mod parsers;
mod phylo;
mod treestream;

pub type TreeFloat = f64;

pub use parsers::TreeParseError;
pub use parsers::fragment::scan_fragment;
pub use parsers::newick::parse_newick;
pub use parsers::newick::write_newick;
pub use parsers::nexus::FileFormat;
pub use parsers::nexus::NEXUS_HEADER;
pub use parsers::nexus::NexusError;
pub use parsers::nexus::TranslateBuilder;
pub use parsers::nexus::TranslateState;
pub use parsers::nexus::TranslateTable;
pub use parsers::nexus::classify_format;
pub use parsers::nexus::is_translate_marker;
pub use phylo::Node;
pub use phylo::NodeId;
pub use phylo::Tree;
pub use phylo::TreeError;
pub use treestream::AssembledFile;
pub use treestream::CatConfig;
pub use treestream::CatSummary;
pub use treestream::InputSource;
pub use treestream::NO_NAME;
pub use treestream::SampleWindow;
pub use treestream::StreamError;
pub use treestream::StreamResult;
pub use treestream::assemble;
pub use treestream::burnin_offset;
pub use treestream::cat_file;
pub use treestream::cat_sources;
pub use treestream::resolve_names;
