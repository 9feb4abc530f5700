//! Registration of the full vocabulary.

use std::sync::OnceLock;

use serde_json::{Map, Value};

use super::fragments::*;
use super::node::*;
use crate::error::CodecError;
use crate::registry::{Registry, RegistryBuilder};
use crate::shape::{read_layer, Fragment};
use crate::wire::DecodeCx;

/// Build a registry holding every vocabulary discriminator and the
/// `Question` refinement.
pub fn vocabulary() -> Registry {
    let mut builder = RegistryBuilder::new();
    register_vocabulary(&mut builder);
    let registry = builder.build();
    tracing::debug!(discriminators = registry.len(), "vocabulary registry built");
    registry
}

/// Process-wide vocabulary registry, built on first use.
pub fn shared() -> &'static Registry {
    static REGISTRY: OnceLock<Registry> = OnceLock::new();
    REGISTRY.get_or_init(vocabulary)
}

/// Add every vocabulary entry to `builder`, leaving room for callers to
/// register extensions alongside.
pub fn register_vocabulary(builder: &mut RegistryBuilder) {
    for kind in ObjectType::ALL {
        builder.register(kind.discriminator(), move |map, cx| {
            Ok(Node::Object(kind, ObjectNode::read(map, cx)?))
        });
    }
    for kind in ActorType::ALL {
        builder.register(kind.discriminator(), move |map, cx| {
            Ok(Node::Actor(kind, ActorNode::read(map, cx)?))
        });
    }
    for kind in LinkType::ALL {
        builder.register(kind.discriminator(), move |map, cx| {
            Ok(Node::Link(kind, LinkNode::read(map, cx)?))
        });
    }
    for kind in ActivityType::ALL {
        builder.register(kind.discriminator(), move |map, cx| {
            Ok(Node::Activity(kind, ActivityNode::read(map, cx)?))
        });
    }

    builder
        .register(PLACE.name, |map, cx| Ok(Node::Place(PlaceNode::read(map, cx)?)))
        .register(PROFILE.name, |map, cx| {
            Ok(Node::Profile(ProfileNode::read(map, cx)?))
        })
        .register(RELATIONSHIP.name, |map, cx| {
            Ok(Node::Relationship(RelationshipNode::read(map, cx)?))
        })
        .register(TOMBSTONE.name, |map, cx| {
            Ok(Node::Tombstone(TombstoneNode::read(map, cx)?))
        });

    builder
        .register(QUESTION.name, |map, cx| {
            Ok(Node::Question(QuestionNode::read(map, cx, open_answer)?))
        })
        .register_sub_variant(SINGLE_CHOICE_QUESTION.name, |map, cx| {
            Ok(Node::Question(QuestionNode::read(map, cx, one_of_answer)?))
        })
        .register_sub_variant(MULTIPLE_CHOICE_QUESTION.name, |map, cx| {
            Ok(Node::Question(QuestionNode::read(map, cx, any_of_answer)?))
        })
        .register_sub_variant(CLOSED_QUESTION.name, |map, cx| {
            Ok(Node::Question(QuestionNode::read(map, cx, closed_answer)?))
        })
        .refine(QUESTION.name, refine_question);

    builder
        .register(COLLECTION.name, |map, cx| {
            Ok(Node::Collection(CollectionNode::read(map, cx, false)?))
        })
        .register(ORDERED_COLLECTION.name, |map, cx| {
            Ok(Node::Collection(CollectionNode::read(map, cx, true)?))
        })
        .register(COLLECTION_PAGE.name, |map, cx| {
            Ok(Node::CollectionPage(CollectionPageNode::read(map, cx, false)?))
        })
        .register(ORDERED_COLLECTION_PAGE.name, |map, cx| {
            Ok(Node::CollectionPage(CollectionPageNode::read(map, cx, true)?))
        });
}

/// Pick the `Question` sub-variant from sibling keys.
///
/// Priority is `oneOf`, then `anyOf`, then `closed`; a question with none of
/// them decodes as the plain variant. A key holding `null` counts as absent.
pub fn refine_question(map: &Map<String, Value>) -> Option<&'static str> {
    let present = |key: &str| map.get(key).is_some_and(|v| !v.is_null());
    if present("oneOf") {
        Some(SINGLE_CHOICE_QUESTION.name)
    } else if present("anyOf") {
        Some(MULTIPLE_CHOICE_QUESTION.name)
    } else if present("closed") {
        Some(CLOSED_QUESTION.name)
    } else {
        None
    }
}

fn open_answer(_map: &Map<String, Value>, _cx: &mut DecodeCx<'_>) -> Result<Answer, CodecError> {
    Ok(Answer::Open)
}

fn one_of_answer(map: &Map<String, Value>, cx: &mut DecodeCx<'_>) -> Result<Answer, CodecError> {
    Ok(Answer::OneOf(read_layer(map, cx)?))
}

fn any_of_answer(map: &Map<String, Value>, cx: &mut DecodeCx<'_>) -> Result<Answer, CodecError> {
    Ok(Answer::AnyOf(read_layer(map, cx)?))
}

fn closed_answer(map: &Map<String, Value>, cx: &mut DecodeCx<'_>) -> Result<Answer, CodecError> {
    Ok(Answer::Closed(read_layer(map, cx)?))
}

/// Leaf fragments of every wire discriminator, in registration order.
pub fn concrete_fragments() -> Vec<&'static Fragment> {
    let mut fragments: Vec<&'static Fragment> = Vec::new();
    fragments.extend(ObjectType::ALL.iter().map(|k| k.fragment()));
    fragments.extend(ActorType::ALL.iter().map(|k| k.fragment()));
    fragments.extend(LinkType::ALL.iter().map(|k| k.fragment()));
    fragments.extend(ActivityType::ALL.iter().map(|k| k.fragment()));
    fragments.extend([
        &PLACE,
        &PROFILE,
        &RELATIONSHIP,
        &TOMBSTONE,
        &QUESTION,
        &COLLECTION,
        &ORDERED_COLLECTION,
        &COLLECTION_PAGE,
        &ORDERED_COLLECTION_PAGE,
    ]);
    fragments
}

/// Shape description for a wire discriminator.
pub fn shape_of(discriminator: &str) -> Option<&'static Fragment> {
    concrete_fragments()
        .into_iter()
        .find(|f| f.name == discriminator)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn registers_every_concrete_fragment() {
        let registry = vocabulary();
        let fragments = concrete_fragments();
        assert_eq!(fragments.len(), 54);
        assert_eq!(registry.len(), fragments.len());
        for fragment in fragments {
            assert!(registry.contains(fragment.name), "{} missing", fragment.name);
        }
    }

    #[test]
    fn abstract_and_sub_variant_fragments_are_not_discriminators() {
        let registry = vocabulary();
        for name in ["Entity", "Actor", "SingleChoiceQuestion", "ClosedQuestion"] {
            assert!(!registry.contains(name), "{name} should not be registered");
        }
    }

    #[test]
    fn question_refinement_priority() {
        let both = json!({"oneOf": [], "anyOf": [], "closed": true});
        assert_eq!(
            refine_question(both.as_object().unwrap()),
            Some("SingleChoiceQuestion")
        );
        let any = json!({"anyOf": [], "closed": true});
        assert_eq!(
            refine_question(any.as_object().unwrap()),
            Some("MultipleChoiceQuestion")
        );
        let closed = json!({"closed": true});
        assert_eq!(
            refine_question(closed.as_object().unwrap()),
            Some("ClosedQuestion")
        );
        let plain = json!({"oneOf": null});
        assert_eq!(refine_question(plain.as_object().unwrap()), None);
    }

    #[test]
    fn shared_registry_is_built_once() {
        let a = shared() as *const Registry;
        let b = shared() as *const Registry;
        assert_eq!(a, b);
    }

    #[test]
    fn shape_lookup() {
        let shape = shape_of("OrderedCollectionPage").unwrap();
        assert!(shape.extends(&COLLECTION));
        assert!(shape_of("Actor").is_none());
    }
}
