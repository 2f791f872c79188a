//! Builders that assemble related document sets.

pub mod movie_graph;
pub mod relations;

pub use movie_graph::{ActorDocument, ActorIndex, MovieDataset, MovieDocument, MovieGraphBuilder};
pub use relations::{
    LinkedUser, LocationRef, RelationDataset, UserStatus, build_one_to_many, build_one_to_one,
};
