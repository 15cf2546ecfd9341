//! Request orchestration and result assembly

pub mod assembler;
pub mod orchestrator;
pub mod result;

pub use assembler::assemble;
pub use orchestrator::{
    CollectiveDisambiguator, CollectiveDisambiguatorService, MentionGraphDisambiguator,
    MentionSubgraphConstruction,
};
pub use result::{ResultEntry, ResultTable};
