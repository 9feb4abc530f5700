//! Typed field sets, one per fragment that declares fields.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use super::fragments::*;
use super::Ref;
use crate::either::Either;
use crate::error::CodecError;
use crate::shape::{FieldReader, FieldWriter, Fragment, Props};
use crate::wire::DecodeCx;

/// Text keyed by language tag.
pub type LangMap = BTreeMap<String, String>;

/// Value of `closed`: when the question closed, or just whether it has.
pub type Closed = Either<DateTime<Utc>, bool>;

// -------------------------------------------------------------------------
// Entity

#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntityProps {
    pub id: Option<String>,
}

impl EntityProps {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: Some(id.into()) }
    }
}

impl Props for EntityProps {
    fn fragment() -> &'static Fragment {
        &ENTITY
    }

    fn write(&self, out: &mut FieldWriter<'_>) -> Result<(), CodecError> {
        out.put("id", &self.id)
    }

    fn read(input: &FieldReader<'_>, cx: &mut DecodeCx<'_>) -> Result<Self, CodecError> {
        Ok(Self {
            id: input.optional("id", cx)?,
        })
    }
}

// -------------------------------------------------------------------------
// Object

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObjectProps {
    pub attachment: Vec<Ref>,
    pub attributed_to: Vec<Ref>,
    pub audience: Vec<Ref>,
    pub bcc: Vec<Ref>,
    pub bto: Vec<Ref>,
    pub cc: Vec<Ref>,
    pub content: Option<String>,
    pub content_map: LangMap,
    pub context: Option<Ref>,
    /// ISO 8601 duration, kept verbatim.
    pub duration: Option<String>,
    pub end_time: Option<DateTime<Utc>>,
    pub generator: Option<Ref>,
    pub icon: Vec<Ref>,
    pub image: Vec<Ref>,
    pub in_reply_to: Vec<Ref>,
    pub location: Vec<Ref>,
    pub media_type: Option<String>,
    pub name: Option<String>,
    pub name_map: LangMap,
    pub preview: Option<Ref>,
    pub published: Option<DateTime<Utc>>,
    pub replies: Option<Ref>,
    pub start_time: Option<DateTime<Utc>>,
    pub summary: Option<String>,
    pub summary_map: LangMap,
    pub tag: Vec<Ref>,
    pub to: Vec<Ref>,
    pub updated: Option<DateTime<Utc>>,
    pub url: Option<Ref>,
}

impl Props for ObjectProps {
    fn fragment() -> &'static Fragment {
        &OBJECT
    }

    fn write(&self, out: &mut FieldWriter<'_>) -> Result<(), CodecError> {
        out.put("attachment", &self.attachment)?;
        out.put("attributedTo", &self.attributed_to)?;
        out.put("audience", &self.audience)?;
        out.put("bcc", &self.bcc)?;
        out.put("bto", &self.bto)?;
        out.put("cc", &self.cc)?;
        out.put("content", &self.content)?;
        out.put("contentMap", &self.content_map)?;
        out.put("context", &self.context)?;
        out.put("duration", &self.duration)?;
        out.put("endTime", &self.end_time)?;
        out.put("generator", &self.generator)?;
        out.put("icon", &self.icon)?;
        out.put("image", &self.image)?;
        out.put("inReplyTo", &self.in_reply_to)?;
        out.put("location", &self.location)?;
        out.put("mediaType", &self.media_type)?;
        out.put("name", &self.name)?;
        out.put("nameMap", &self.name_map)?;
        out.put("preview", &self.preview)?;
        out.put("published", &self.published)?;
        out.put("replies", &self.replies)?;
        out.put("startTime", &self.start_time)?;
        out.put("summary", &self.summary)?;
        out.put("summaryMap", &self.summary_map)?;
        out.put("tag", &self.tag)?;
        out.put("to", &self.to)?;
        out.put("updated", &self.updated)?;
        out.put("url", &self.url)
    }

    fn read(input: &FieldReader<'_>, cx: &mut DecodeCx<'_>) -> Result<Self, CodecError> {
        Ok(Self {
            attachment: input.optional("attachment", cx)?,
            attributed_to: input.optional("attributedTo", cx)?,
            audience: input.optional("audience", cx)?,
            bcc: input.optional("bcc", cx)?,
            bto: input.optional("bto", cx)?,
            cc: input.optional("cc", cx)?,
            content: input.optional("content", cx)?,
            content_map: input.optional("contentMap", cx)?,
            context: input.optional("context", cx)?,
            duration: input.optional("duration", cx)?,
            end_time: input.optional("endTime", cx)?,
            generator: input.optional("generator", cx)?,
            icon: input.optional("icon", cx)?,
            image: input.optional("image", cx)?,
            in_reply_to: input.optional("inReplyTo", cx)?,
            location: input.optional("location", cx)?,
            media_type: input.optional("mediaType", cx)?,
            name: input.optional("name", cx)?,
            name_map: input.optional("nameMap", cx)?,
            preview: input.optional("preview", cx)?,
            published: input.optional("published", cx)?,
            replies: input.optional("replies", cx)?,
            start_time: input.optional("startTime", cx)?,
            summary: input.optional("summary", cx)?,
            summary_map: input.optional("summaryMap", cx)?,
            tag: input.optional("tag", cx)?,
            to: input.optional("to", cx)?,
            updated: input.optional("updated", cx)?,
            url: input.optional("url", cx)?,
        })
    }
}

// -------------------------------------------------------------------------
// Place, Profile, Relationship, Tombstone

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlaceProps {
    pub accuracy: Option<f64>,
    pub altitude: Option<f64>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub radius: Option<f64>,
    pub units: Option<String>,
}

impl Props for PlaceProps {
    fn fragment() -> &'static Fragment {
        &PLACE
    }

    fn write(&self, out: &mut FieldWriter<'_>) -> Result<(), CodecError> {
        out.put("accuracy", &self.accuracy)?;
        out.put("altitude", &self.altitude)?;
        out.put("latitude", &self.latitude)?;
        out.put("longitude", &self.longitude)?;
        out.put("radius", &self.radius)?;
        out.put("units", &self.units)
    }

    fn read(input: &FieldReader<'_>, cx: &mut DecodeCx<'_>) -> Result<Self, CodecError> {
        Ok(Self {
            accuracy: input.optional("accuracy", cx)?,
            altitude: input.optional("altitude", cx)?,
            latitude: input.optional("latitude", cx)?,
            longitude: input.optional("longitude", cx)?,
            radius: input.optional("radius", cx)?,
            units: input.optional("units", cx)?,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileProps {
    pub describes: Option<Ref>,
}

impl Props for ProfileProps {
    fn fragment() -> &'static Fragment {
        &PROFILE
    }

    fn write(&self, out: &mut FieldWriter<'_>) -> Result<(), CodecError> {
        out.put("describes", &self.describes)
    }

    fn read(input: &FieldReader<'_>, cx: &mut DecodeCx<'_>) -> Result<Self, CodecError> {
        Ok(Self {
            describes: input.optional("describes", cx)?,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RelationshipProps {
    pub subject: Option<Ref>,
    pub object: Option<Ref>,
    pub relationship: Vec<Ref>,
}

impl Props for RelationshipProps {
    fn fragment() -> &'static Fragment {
        &RELATIONSHIP
    }

    fn write(&self, out: &mut FieldWriter<'_>) -> Result<(), CodecError> {
        out.put("subject", &self.subject)?;
        out.put("object", &self.object)?;
        out.put("relationship", &self.relationship)
    }

    fn read(input: &FieldReader<'_>, cx: &mut DecodeCx<'_>) -> Result<Self, CodecError> {
        Ok(Self {
            subject: input.optional("subject", cx)?,
            object: input.optional("object", cx)?,
            relationship: input.optional("relationship", cx)?,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TombstoneProps {
    pub former_type: Option<String>,
    pub deleted: Option<DateTime<Utc>>,
}

impl Props for TombstoneProps {
    fn fragment() -> &'static Fragment {
        &TOMBSTONE
    }

    fn write(&self, out: &mut FieldWriter<'_>) -> Result<(), CodecError> {
        out.put("formerType", &self.former_type)?;
        out.put("deleted", &self.deleted)
    }

    fn read(input: &FieldReader<'_>, cx: &mut DecodeCx<'_>) -> Result<Self, CodecError> {
        Ok(Self {
            former_type: input.optional("formerType", cx)?,
            deleted: input.optional("deleted", cx)?,
        })
    }
}

// -------------------------------------------------------------------------
// Actor

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ActorProps {
    pub inbox: Option<Ref>,
    pub outbox: Option<Ref>,
    pub following: Option<Ref>,
    pub followers: Option<Ref>,
    pub liked: Option<Ref>,
    pub streams: Vec<Ref>,
    pub preferred_username: Option<String>,
}

impl Props for ActorProps {
    fn fragment() -> &'static Fragment {
        &ACTOR
    }

    fn write(&self, out: &mut FieldWriter<'_>) -> Result<(), CodecError> {
        out.put("inbox", &self.inbox)?;
        out.put("outbox", &self.outbox)?;
        out.put("following", &self.following)?;
        out.put("followers", &self.followers)?;
        out.put("liked", &self.liked)?;
        out.put("streams", &self.streams)?;
        out.put("preferredUsername", &self.preferred_username)
    }

    fn read(input: &FieldReader<'_>, cx: &mut DecodeCx<'_>) -> Result<Self, CodecError> {
        Ok(Self {
            inbox: input.optional("inbox", cx)?,
            outbox: input.optional("outbox", cx)?,
            following: input.optional("following", cx)?,
            followers: input.optional("followers", cx)?,
            liked: input.optional("liked", cx)?,
            streams: input.optional("streams", cx)?,
            preferred_username: input.optional("preferredUsername", cx)?,
        })
    }
}

// -------------------------------------------------------------------------
// Link

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LinkProps {
    pub height: Option<u64>,
    pub href: Option<String>,
    pub hreflang: Option<String>,
    pub media_type: Option<String>,
    pub name: Option<String>,
    pub name_map: LangMap,
    pub preview: Option<Ref>,
    pub rel: Vec<String>,
    pub width: Option<u64>,
}

impl Props for LinkProps {
    fn fragment() -> &'static Fragment {
        &LINK
    }

    fn write(&self, out: &mut FieldWriter<'_>) -> Result<(), CodecError> {
        out.put("height", &self.height)?;
        out.put("href", &self.href)?;
        out.put("hreflang", &self.hreflang)?;
        out.put("mediaType", &self.media_type)?;
        out.put("name", &self.name)?;
        out.put("nameMap", &self.name_map)?;
        out.put("preview", &self.preview)?;
        out.put("rel", &self.rel)?;
        out.put("width", &self.width)
    }

    fn read(input: &FieldReader<'_>, cx: &mut DecodeCx<'_>) -> Result<Self, CodecError> {
        Ok(Self {
            height: input.optional("height", cx)?,
            href: input.optional("href", cx)?,
            hreflang: input.optional("hreflang", cx)?,
            media_type: input.optional("mediaType", cx)?,
            name: input.optional("name", cx)?,
            name_map: input.optional("nameMap", cx)?,
            preview: input.optional("preview", cx)?,
            rel: input.optional("rel", cx)?,
            width: input.optional("width", cx)?,
        })
    }
}

// -------------------------------------------------------------------------
// Activity

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ActivityProps {
    pub actor: Vec<Ref>,
    pub instrument: Vec<Ref>,
    /// Left empty by intransitive activities.
    pub object: Vec<Ref>,
    pub origin: Vec<Ref>,
    pub result: Vec<Ref>,
    pub target: Vec<Ref>,
}

impl Props for ActivityProps {
    fn fragment() -> &'static Fragment {
        &ACTIVITY
    }

    fn write(&self, out: &mut FieldWriter<'_>) -> Result<(), CodecError> {
        out.put("actor", &self.actor)?;
        out.put("instrument", &self.instrument)?;
        out.put("object", &self.object)?;
        out.put("origin", &self.origin)?;
        out.put("result", &self.result)?;
        out.put("target", &self.target)
    }

    fn read(input: &FieldReader<'_>, cx: &mut DecodeCx<'_>) -> Result<Self, CodecError> {
        Ok(Self {
            actor: input.optional("actor", cx)?,
            instrument: input.optional("instrument", cx)?,
            object: input.optional("object", cx)?,
            origin: input.optional("origin", cx)?,
            result: input.optional("result", cx)?,
            target: input.optional("target", cx)?,
        })
    }
}

// -------------------------------------------------------------------------
// Question answers

#[derive(Debug, Clone, Default, PartialEq)]
pub struct OneOfProps {
    pub one_of: Vec<Ref>,
}

impl Props for OneOfProps {
    fn fragment() -> &'static Fragment {
        &SINGLE_CHOICE_QUESTION
    }

    fn write(&self, out: &mut FieldWriter<'_>) -> Result<(), CodecError> {
        out.put("oneOf", &self.one_of)
    }

    fn read(input: &FieldReader<'_>, cx: &mut DecodeCx<'_>) -> Result<Self, CodecError> {
        Ok(Self {
            one_of: input.required("oneOf", cx)?,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnyOfProps {
    pub any_of: Vec<Ref>,
}

impl Props for AnyOfProps {
    fn fragment() -> &'static Fragment {
        &MULTIPLE_CHOICE_QUESTION
    }

    fn write(&self, out: &mut FieldWriter<'_>) -> Result<(), CodecError> {
        out.put("anyOf", &self.any_of)
    }

    fn read(input: &FieldReader<'_>, cx: &mut DecodeCx<'_>) -> Result<Self, CodecError> {
        Ok(Self {
            any_of: input.required("anyOf", cx)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClosedProps {
    pub closed: Closed,
}

impl Props for ClosedProps {
    fn fragment() -> &'static Fragment {
        &CLOSED_QUESTION
    }

    fn write(&self, out: &mut FieldWriter<'_>) -> Result<(), CodecError> {
        out.put("closed", &self.closed)
    }

    fn read(input: &FieldReader<'_>, cx: &mut DecodeCx<'_>) -> Result<Self, CodecError> {
        Ok(Self {
            closed: input.required("closed", cx)?,
        })
    }
}

// -------------------------------------------------------------------------
// Collections

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollectionProps {
    pub current: Option<Ref>,
    pub first: Option<Ref>,
    /// Written as `orderedItems` by ordered collections.
    pub items: Vec<Ref>,
    pub last: Option<Ref>,
    pub total_items: Option<u64>,
}

impl Props for CollectionProps {
    fn fragment() -> &'static Fragment {
        &COLLECTION
    }

    fn write(&self, out: &mut FieldWriter<'_>) -> Result<(), CodecError> {
        out.put("current", &self.current)?;
        out.put("first", &self.first)?;
        out.put("items", &self.items)?;
        out.put("last", &self.last)?;
        out.put("totalItems", &self.total_items)
    }

    fn read(input: &FieldReader<'_>, cx: &mut DecodeCx<'_>) -> Result<Self, CodecError> {
        Ok(Self {
            current: input.optional("current", cx)?,
            first: input.optional("first", cx)?,
            items: input.optional("items", cx)?,
            last: input.optional("last", cx)?,
            total_items: input.optional("totalItems", cx)?,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageProps {
    pub next: Option<Ref>,
    pub part_of: Option<Ref>,
    pub prev: Option<Ref>,
}

impl Props for PageProps {
    fn fragment() -> &'static Fragment {
        &COLLECTION_PAGE
    }

    fn write(&self, out: &mut FieldWriter<'_>) -> Result<(), CodecError> {
        out.put("next", &self.next)?;
        out.put("partOf", &self.part_of)?;
        out.put("prev", &self.prev)
    }

    fn read(input: &FieldReader<'_>, cx: &mut DecodeCx<'_>) -> Result<Self, CodecError> {
        Ok(Self {
            next: input.optional("next", cx)?,
            part_of: input.optional("partOf", cx)?,
            prev: input.optional("prev", cx)?,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderedPageProps {
    pub start_index: Option<u64>,
}

impl Props for OrderedPageProps {
    fn fragment() -> &'static Fragment {
        &ORDERED_COLLECTION_PAGE
    }

    fn write(&self, out: &mut FieldWriter<'_>) -> Result<(), CodecError> {
        out.put("startIndex", &self.start_index)
    }

    fn read(input: &FieldReader<'_>, cx: &mut DecodeCx<'_>) -> Result<Self, CodecError> {
        Ok(Self {
            start_index: input.optional("startIndex", cx)?,
        })
    }
}
