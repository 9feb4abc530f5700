//! The ActivityStreams vocabulary: fragments, typed props and concrete variants.

pub mod bootstrap;
pub mod fragments;
pub mod node;
pub mod props;

pub use bootstrap::{
    concrete_fragments, refine_question, register_vocabulary, shape_of, shared, vocabulary,
};
pub use node::{
    ActivityNode, ActivityType, ActorNode, ActorType, Answer, CollectionNode, CollectionPageNode,
    Entity, LinkNode, LinkType, Node, ObjectNode, ObjectType, PlaceNode, ProfileNode, QuestionNode,
    Reference, RelationshipNode, TombstoneNode,
};
pub use props::*;

use crate::either::Either;

/// An inline node or the IRI of one.
pub type Ref = Either<String, Box<Node>>;
