//! Concrete variants.
//!
//! [`Node`] is the closed set of everything the vocabulary can decode. Arms
//! that share a layout pair a kind enum with one shape struct; the kind only
//! selects the discriminator and the fragment chain.

use std::borrow::Cow;

use serde_json::{Map, Value};

use super::fragments::*;
use super::props::*;
use crate::error::CodecError;
use crate::shape::{read_layer, Family, Fragment, Layer};
use crate::wire::DecodeCx;

/// Minimal capability every decoded value exposes to collaborators.
pub trait Entity {
    fn id(&self) -> Option<&str>;

    /// Wire discriminator; `None` for reference-only values.
    fn discriminator(&self) -> Option<&'static str>;
}

// -------------------------------------------------------------------------
// Kinds

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectType {
    Object,
    Article,
    Document,
    Audio,
    Image,
    Video,
    Page,
    Event,
    Note,
}

impl ObjectType {
    pub const ALL: [Self; 9] = [
        Self::Object,
        Self::Article,
        Self::Document,
        Self::Audio,
        Self::Image,
        Self::Video,
        Self::Page,
        Self::Event,
        Self::Note,
    ];

    pub fn fragment(self) -> &'static Fragment {
        match self {
            Self::Object => &OBJECT,
            Self::Article => &ARTICLE,
            Self::Document => &DOCUMENT,
            Self::Audio => &AUDIO,
            Self::Image => &IMAGE,
            Self::Video => &VIDEO,
            Self::Page => &PAGE,
            Self::Event => &EVENT,
            Self::Note => &NOTE,
        }
    }

    pub fn discriminator(self) -> &'static str {
        self.fragment().name
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActorType {
    Application,
    Group,
    Organization,
    Person,
    Service,
}

impl ActorType {
    pub const ALL: [Self; 5] = [
        Self::Application,
        Self::Group,
        Self::Organization,
        Self::Person,
        Self::Service,
    ];

    pub fn fragment(self) -> &'static Fragment {
        match self {
            Self::Application => &APPLICATION,
            Self::Group => &GROUP,
            Self::Organization => &ORGANIZATION,
            Self::Person => &PERSON,
            Self::Service => &SERVICE,
        }
    }

    pub fn discriminator(self) -> &'static str {
        self.fragment().name
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LinkType {
    Link,
    Mention,
}

impl LinkType {
    pub const ALL: [Self; 2] = [Self::Link, Self::Mention];

    pub fn fragment(self) -> &'static Fragment {
        match self {
            Self::Link => &LINK,
            Self::Mention => &MENTION,
        }
    }

    pub fn discriminator(self) -> &'static str {
        self.fragment().name
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActivityType {
    Activity,
    IntransitiveActivity,
    Accept,
    TentativeAccept,
    Add,
    Arrive,
    Create,
    Delete,
    Follow,
    Ignore,
    Join,
    Leave,
    Like,
    Offer,
    Invite,
    Reject,
    TentativeReject,
    Remove,
    Undo,
    Update,
    View,
    Listen,
    Read,
    Move,
    Travel,
    Announce,
    Block,
    Flag,
    Dislike,
}

impl ActivityType {
    pub const ALL: [Self; 29] = [
        Self::Activity,
        Self::IntransitiveActivity,
        Self::Accept,
        Self::TentativeAccept,
        Self::Add,
        Self::Arrive,
        Self::Create,
        Self::Delete,
        Self::Follow,
        Self::Ignore,
        Self::Join,
        Self::Leave,
        Self::Like,
        Self::Offer,
        Self::Invite,
        Self::Reject,
        Self::TentativeReject,
        Self::Remove,
        Self::Undo,
        Self::Update,
        Self::View,
        Self::Listen,
        Self::Read,
        Self::Move,
        Self::Travel,
        Self::Announce,
        Self::Block,
        Self::Flag,
        Self::Dislike,
    ];

    pub fn fragment(self) -> &'static Fragment {
        match self {
            Self::Activity => &ACTIVITY,
            Self::IntransitiveActivity => &INTRANSITIVE_ACTIVITY,
            Self::Accept => &ACCEPT,
            Self::TentativeAccept => &TENTATIVE_ACCEPT,
            Self::Add => &ADD,
            Self::Arrive => &ARRIVE,
            Self::Create => &CREATE,
            Self::Delete => &DELETE,
            Self::Follow => &FOLLOW,
            Self::Ignore => &IGNORE,
            Self::Join => &JOIN,
            Self::Leave => &LEAVE,
            Self::Like => &LIKE,
            Self::Offer => &OFFER,
            Self::Invite => &INVITE,
            Self::Reject => &REJECT,
            Self::TentativeReject => &TENTATIVE_REJECT,
            Self::Remove => &REMOVE,
            Self::Undo => &UNDO,
            Self::Update => &UPDATE,
            Self::View => &VIEW,
            Self::Listen => &LISTEN,
            Self::Read => &READ,
            Self::Move => &MOVE,
            Self::Travel => &TRAVEL,
            Self::Announce => &ANNOUNCE,
            Self::Block => &BLOCK,
            Self::Flag => &FLAG,
            Self::Dislike => &DISLIKE,
        }
    }

    pub fn discriminator(self) -> &'static str {
        self.fragment().name
    }

    /// Whether the activity takes an `object`.
    pub fn is_transitive(self) -> bool {
        !self.fragment().extends(&INTRANSITIVE_ACTIVITY)
    }
}

// -------------------------------------------------------------------------
// Shapes

/// A value carrying nothing but an identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    pub id: String,
}

impl Reference {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObjectNode {
    pub entity: EntityProps,
    pub object: ObjectProps,
}

impl ObjectNode {
    pub fn read(map: &Map<String, Value>, cx: &mut DecodeCx<'_>) -> Result<Self, CodecError> {
        Ok(Self {
            entity: read_layer(map, cx)?,
            object: read_layer(map, cx)?,
        })
    }

    fn layers(&self) -> Vec<&dyn Layer> {
        vec![&self.entity as &dyn Layer, &self.object]
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ActorNode {
    pub entity: EntityProps,
    pub object: ObjectProps,
    pub actor: ActorProps,
}

impl ActorNode {
    pub fn read(map: &Map<String, Value>, cx: &mut DecodeCx<'_>) -> Result<Self, CodecError> {
        Ok(Self {
            entity: read_layer(map, cx)?,
            object: read_layer(map, cx)?,
            actor: read_layer(map, cx)?,
        })
    }

    fn layers(&self) -> Vec<&dyn Layer> {
        vec![&self.entity as &dyn Layer, &self.object, &self.actor]
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlaceNode {
    pub entity: EntityProps,
    pub object: ObjectProps,
    pub place: PlaceProps,
}

impl PlaceNode {
    pub fn read(map: &Map<String, Value>, cx: &mut DecodeCx<'_>) -> Result<Self, CodecError> {
        Ok(Self {
            entity: read_layer(map, cx)?,
            object: read_layer(map, cx)?,
            place: read_layer(map, cx)?,
        })
    }

    fn layers(&self) -> Vec<&dyn Layer> {
        vec![&self.entity as &dyn Layer, &self.object, &self.place]
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileNode {
    pub entity: EntityProps,
    pub object: ObjectProps,
    pub profile: ProfileProps,
}

impl ProfileNode {
    pub fn read(map: &Map<String, Value>, cx: &mut DecodeCx<'_>) -> Result<Self, CodecError> {
        Ok(Self {
            entity: read_layer(map, cx)?,
            object: read_layer(map, cx)?,
            profile: read_layer(map, cx)?,
        })
    }

    fn layers(&self) -> Vec<&dyn Layer> {
        vec![&self.entity as &dyn Layer, &self.object, &self.profile]
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RelationshipNode {
    pub entity: EntityProps,
    pub object: ObjectProps,
    pub relationship: RelationshipProps,
}

impl RelationshipNode {
    pub fn read(map: &Map<String, Value>, cx: &mut DecodeCx<'_>) -> Result<Self, CodecError> {
        Ok(Self {
            entity: read_layer(map, cx)?,
            object: read_layer(map, cx)?,
            relationship: read_layer(map, cx)?,
        })
    }

    fn layers(&self) -> Vec<&dyn Layer> {
        vec![&self.entity as &dyn Layer, &self.object, &self.relationship]
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TombstoneNode {
    pub entity: EntityProps,
    pub object: ObjectProps,
    pub tombstone: TombstoneProps,
}

impl TombstoneNode {
    pub fn read(map: &Map<String, Value>, cx: &mut DecodeCx<'_>) -> Result<Self, CodecError> {
        Ok(Self {
            entity: read_layer(map, cx)?,
            object: read_layer(map, cx)?,
            tombstone: read_layer(map, cx)?,
        })
    }

    fn layers(&self) -> Vec<&dyn Layer> {
        vec![&self.entity as &dyn Layer, &self.object, &self.tombstone]
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LinkNode {
    pub entity: EntityProps,
    pub link: LinkProps,
}

impl LinkNode {
    pub fn read(map: &Map<String, Value>, cx: &mut DecodeCx<'_>) -> Result<Self, CodecError> {
        Ok(Self {
            entity: read_layer(map, cx)?,
            link: read_layer(map, cx)?,
        })
    }

    fn layers(&self) -> Vec<&dyn Layer> {
        vec![&self.entity as &dyn Layer, &self.link]
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ActivityNode {
    pub entity: EntityProps,
    pub object: ObjectProps,
    pub activity: ActivityProps,
}

impl ActivityNode {
    pub fn read(map: &Map<String, Value>, cx: &mut DecodeCx<'_>) -> Result<Self, CodecError> {
        Ok(Self {
            entity: read_layer(map, cx)?,
            object: read_layer(map, cx)?,
            activity: read_layer(map, cx)?,
        })
    }

    fn layers(&self) -> Vec<&dyn Layer> {
        vec![&self.entity as &dyn Layer, &self.object, &self.activity]
    }
}

/// Which `Question` sub-variant a question is.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Answer {
    /// Plain `Question` with no answer set.
    #[default]
    Open,
    OneOf(OneOfProps),
    AnyOf(AnyOfProps),
    Closed(ClosedProps),
}

impl Answer {
    pub fn fragment(&self) -> &'static Fragment {
        match self {
            Self::Open => &QUESTION,
            Self::OneOf(_) => &SINGLE_CHOICE_QUESTION,
            Self::AnyOf(_) => &MULTIPLE_CHOICE_QUESTION,
            Self::Closed(_) => &CLOSED_QUESTION,
        }
    }

    fn layer(&self) -> Option<&dyn Layer> {
        match self {
            Self::Open => None,
            Self::OneOf(p) => Some(p),
            Self::AnyOf(p) => Some(p),
            Self::Closed(p) => Some(p),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct QuestionNode {
    pub entity: EntityProps,
    pub object: ObjectProps,
    pub activity: ActivityProps,
    pub answer: Answer,
}

impl QuestionNode {
    /// Read a question whose answer layer is `answer`'s fragment.
    pub fn read(
        map: &Map<String, Value>,
        cx: &mut DecodeCx<'_>,
        answer: fn(&Map<String, Value>, &mut DecodeCx<'_>) -> Result<Answer, CodecError>,
    ) -> Result<Self, CodecError> {
        Ok(Self {
            entity: read_layer(map, cx)?,
            object: read_layer(map, cx)?,
            activity: read_layer(map, cx)?,
            answer: answer(map, cx)?,
        })
    }

    fn layers(&self) -> Vec<&dyn Layer> {
        let mut layers = vec![&self.entity as &dyn Layer, &self.object, &self.activity];
        layers.extend(self.answer.layer());
        layers
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollectionNode {
    pub entity: EntityProps,
    pub object: ObjectProps,
    pub collection: CollectionProps,
    /// Selects `OrderedCollection` and the `orderedItems` key.
    pub ordered: bool,
}

impl CollectionNode {
    pub fn read(
        map: &Map<String, Value>,
        cx: &mut DecodeCx<'_>,
        ordered: bool,
    ) -> Result<Self, CodecError> {
        let map = items_view(map, ordered);
        Ok(Self {
            entity: read_layer(&map, cx)?,
            object: read_layer(&map, cx)?,
            collection: read_layer(&map, cx)?,
            ordered,
        })
    }

    pub fn fragment(&self) -> &'static Fragment {
        if self.ordered {
            &ORDERED_COLLECTION
        } else {
            &COLLECTION
        }
    }

    fn layers(&self) -> Vec<&dyn Layer> {
        vec![&self.entity as &dyn Layer, &self.object, &self.collection]
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollectionPageNode {
    pub entity: EntityProps,
    pub object: ObjectProps,
    pub collection: CollectionProps,
    pub page: PageProps,
    /// Only written for ordered pages.
    pub ordered_page: OrderedPageProps,
    pub ordered: bool,
}

impl CollectionPageNode {
    pub fn read(
        map: &Map<String, Value>,
        cx: &mut DecodeCx<'_>,
        ordered: bool,
    ) -> Result<Self, CodecError> {
        let map = items_view(map, ordered);
        Ok(Self {
            entity: read_layer(&map, cx)?,
            object: read_layer(&map, cx)?,
            collection: read_layer(&map, cx)?,
            page: read_layer(&map, cx)?,
            ordered_page: if ordered {
                read_layer(&map, cx)?
            } else {
                OrderedPageProps::default()
            },
            ordered,
        })
    }

    pub fn fragment(&self) -> &'static Fragment {
        if self.ordered {
            &ORDERED_COLLECTION_PAGE
        } else {
            &COLLECTION_PAGE
        }
    }

    fn layers(&self) -> Vec<&dyn Layer> {
        let mut layers = vec![
            &self.entity as &dyn Layer,
            &self.object,
            &self.collection,
            &self.page,
        ];
        if self.ordered {
            layers.push(&self.ordered_page);
        }
        layers
    }
}

/// Ordered collections carry their items under `orderedItems`.
fn items_view(map: &Map<String, Value>, ordered: bool) -> Cow<'_, Map<String, Value>> {
    if !ordered {
        return Cow::Borrowed(map);
    }
    match map.get(ORDERED_ITEMS) {
        Some(items) => {
            let mut renamed = map.clone();
            renamed.remove(ITEMS);
            renamed.insert(ITEMS.to_string(), items.clone());
            Cow::Owned(renamed)
        }
        None => Cow::Borrowed(map),
    }
}

pub(crate) const ITEMS: &str = "items";
pub(crate) const ORDERED_ITEMS: &str = "orderedItems";

// -------------------------------------------------------------------------
// Node

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Reference(Reference),
    Object(ObjectType, ObjectNode),
    Actor(ActorType, ActorNode),
    Place(PlaceNode),
    Profile(ProfileNode),
    Relationship(RelationshipNode),
    Tombstone(TombstoneNode),
    Link(LinkType, LinkNode),
    Activity(ActivityType, ActivityNode),
    Question(QuestionNode),
    Collection(CollectionNode),
    CollectionPage(CollectionPageNode),
}

impl Node {
    pub fn reference(id: impl Into<String>) -> Self {
        Node::Reference(Reference::new(id))
    }

    /// Leaf fragment of this variant's chain; `None` for references.
    pub fn fragment(&self) -> Option<&'static Fragment> {
        let fragment = match self {
            Node::Reference(_) => return None,
            Node::Object(kind, _) => kind.fragment(),
            Node::Actor(kind, _) => kind.fragment(),
            Node::Place(_) => &PLACE,
            Node::Profile(_) => &PROFILE,
            Node::Relationship(_) => &RELATIONSHIP,
            Node::Tombstone(_) => &TOMBSTONE,
            Node::Link(kind, _) => kind.fragment(),
            Node::Activity(kind, _) => kind.fragment(),
            Node::Question(q) => q.answer.fragment(),
            Node::Collection(c) => c.fragment(),
            Node::CollectionPage(p) => p.fragment(),
        };
        Some(fragment)
    }

    pub fn discriminator(&self) -> Option<&'static str> {
        match self {
            Node::Reference(_) => None,
            // Every answer sub-variant is still a `Question` on the wire.
            Node::Question(_) => Some(QUESTION.name),
            other => other.fragment().map(|f| f.name),
        }
    }

    pub fn family(&self) -> Family {
        match self {
            Node::Reference(_) => Family::Entity,
            Node::Link(..) => Family::Link,
            Node::Activity(..) | Node::Question(_) => Family::Activity,
            Node::Collection(_) | Node::CollectionPage(_) => Family::Collection,
            Node::Object(..)
            | Node::Actor(..)
            | Node::Place(_)
            | Node::Profile(_)
            | Node::Relationship(_)
            | Node::Tombstone(_) => Family::Object,
        }
    }

    pub fn id(&self) -> Option<&str> {
        match self {
            Node::Reference(r) => Some(&r.id),
            _ => self.entity().and_then(|e| e.id.as_deref()),
        }
    }

    pub fn entity(&self) -> Option<&EntityProps> {
        match self {
            Node::Reference(_) => None,
            Node::Object(_, n) => Some(&n.entity),
            Node::Actor(_, n) => Some(&n.entity),
            Node::Place(n) => Some(&n.entity),
            Node::Profile(n) => Some(&n.entity),
            Node::Relationship(n) => Some(&n.entity),
            Node::Tombstone(n) => Some(&n.entity),
            Node::Link(_, n) => Some(&n.entity),
            Node::Activity(_, n) => Some(&n.entity),
            Node::Question(n) => Some(&n.entity),
            Node::Collection(n) => Some(&n.entity),
            Node::CollectionPage(n) => Some(&n.entity),
        }
    }

    /// Object-level properties, for every variant in the object chain.
    pub fn object(&self) -> Option<&ObjectProps> {
        match self {
            Node::Reference(_) | Node::Link(..) => None,
            Node::Object(_, n) => Some(&n.object),
            Node::Actor(_, n) => Some(&n.object),
            Node::Place(n) => Some(&n.object),
            Node::Profile(n) => Some(&n.object),
            Node::Relationship(n) => Some(&n.object),
            Node::Tombstone(n) => Some(&n.object),
            Node::Activity(_, n) => Some(&n.object),
            Node::Question(n) => Some(&n.object),
            Node::Collection(n) => Some(&n.object),
            Node::CollectionPage(n) => Some(&n.object),
        }
    }

    /// Data layers, ancestor first.
    pub fn layers(&self) -> Vec<&dyn Layer> {
        match self {
            Node::Reference(_) => Vec::new(),
            Node::Object(_, n) => n.layers(),
            Node::Actor(_, n) => n.layers(),
            Node::Place(n) => n.layers(),
            Node::Profile(n) => n.layers(),
            Node::Relationship(n) => n.layers(),
            Node::Tombstone(n) => n.layers(),
            Node::Link(_, n) => n.layers(),
            Node::Activity(_, n) => n.layers(),
            Node::Question(n) => n.layers(),
            Node::Collection(n) => n.layers(),
            Node::CollectionPage(n) => n.layers(),
        }
    }

    /// Whether items are written as `orderedItems`.
    pub fn is_ordered(&self) -> bool {
        match self {
            Node::Collection(c) => c.ordered,
            Node::CollectionPage(p) => p.ordered,
            _ => false,
        }
    }
}

impl Entity for Node {
    fn id(&self) -> Option<&str> {
        Node::id(self)
    }

    fn discriminator(&self) -> Option<&'static str> {
        Node::discriminator(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_discriminators_match_fragment_names() {
        assert_eq!(ActivityType::TentativeAccept.discriminator(), "TentativeAccept");
        assert_eq!(ObjectType::Image.discriminator(), "Image");
        assert_eq!(ActorType::Person.discriminator(), "Person");
    }

    #[test]
    fn tentative_accept_chain() {
        let names: Vec<_> = ActivityType::TentativeAccept
            .fragment()
            .chain()
            .iter()
            .map(|f| f.name)
            .collect();
        assert_eq!(
            names,
            vec!["Entity", "Object", "Activity", "Accept", "TentativeAccept"]
        );
    }

    #[test]
    fn intransitive_kinds() {
        assert!(!ActivityType::Arrive.is_transitive());
        assert!(!ActivityType::Travel.is_transitive());
        assert!(!ActivityType::IntransitiveActivity.is_transitive());
        assert!(ActivityType::Create.is_transitive());
    }

    #[test]
    fn question_sub_variants_share_discriminator() {
        let closed = Node::Question(QuestionNode {
            answer: Answer::Closed(ClosedProps {
                closed: crate::either::Either::right(true),
            }),
            ..Default::default()
        });
        assert_eq!(closed.discriminator(), Some("Question"));
        assert_eq!(closed.fragment().map(|f| f.name), Some("ClosedQuestion"));
        assert_eq!(closed.family(), Family::Activity);
        assert_eq!(closed.family().as_str(), "activity");
    }

    #[test]
    fn reference_has_id_but_no_discriminator() {
        let node = Node::reference("http://ex.org/1");
        assert_eq!(node.id(), Some("http://ex.org/1"));
        assert_eq!(node.discriminator(), None);
        assert!(node.layers().is_empty());
    }

    #[test]
    fn ordered_collection_selects_fragment() {
        let c = CollectionNode {
            ordered: true,
            ..Default::default()
        };
        assert_eq!(c.fragment().name, "OrderedCollection");
    }
}
