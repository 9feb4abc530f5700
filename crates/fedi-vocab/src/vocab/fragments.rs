//! Fragment tables for the ActivityStreams vocabulary.
//!
//! Every wire discriminator has a fragment of the same name. Subtypes that add
//! no fields still get an empty fragment so that each variant has one linear
//! ancestry.

use crate::shape::FieldKind::*;
use crate::shape::{Field, Fragment};

pub static ENTITY: Fragment = Fragment {
    name: "Entity",
    parent: None,
    fields: &[Field::optional("id", Str)],
};

pub static OBJECT: Fragment = Fragment {
    name: "Object",
    parent: Some(&ENTITY),
    fields: &[
        Field::optional("attachment", RefList),
        Field::optional("attributedTo", RefList),
        Field::optional("audience", RefList),
        Field::optional("bcc", RefList),
        Field::optional("bto", RefList),
        Field::optional("cc", RefList),
        Field::optional("content", Str),
        Field::optional("contentMap", LangMap),
        Field::optional("context", Ref),
        Field::optional("duration", Str),
        Field::optional("endTime", Timestamp),
        Field::optional("generator", Ref),
        Field::optional("icon", RefList),
        Field::optional("image", RefList),
        Field::optional("inReplyTo", RefList),
        Field::optional("location", RefList),
        Field::optional("mediaType", Str),
        Field::optional("name", Str),
        Field::optional("nameMap", LangMap),
        Field::optional("preview", Ref),
        Field::optional("published", Timestamp),
        Field::optional("replies", Ref),
        Field::optional("startTime", Timestamp),
        Field::optional("summary", Str),
        Field::optional("summaryMap", LangMap),
        Field::optional("tag", RefList),
        Field::optional("to", RefList),
        Field::optional("updated", Timestamp),
        Field::optional("url", Ref),
    ],
};

// ── Object types ─────────────────────────────────────────────────────────────

pub static ARTICLE: Fragment = Fragment {
    name: "Article",
    parent: Some(&OBJECT),
    fields: &[],
};

pub static DOCUMENT: Fragment = Fragment {
    name: "Document",
    parent: Some(&OBJECT),
    fields: &[],
};

pub static AUDIO: Fragment = Fragment {
    name: "Audio",
    parent: Some(&DOCUMENT),
    fields: &[],
};

pub static IMAGE: Fragment = Fragment {
    name: "Image",
    parent: Some(&DOCUMENT),
    fields: &[],
};

pub static VIDEO: Fragment = Fragment {
    name: "Video",
    parent: Some(&DOCUMENT),
    fields: &[],
};

pub static PAGE: Fragment = Fragment {
    name: "Page",
    parent: Some(&DOCUMENT),
    fields: &[],
};

pub static EVENT: Fragment = Fragment {
    name: "Event",
    parent: Some(&OBJECT),
    fields: &[],
};

pub static NOTE: Fragment = Fragment {
    name: "Note",
    parent: Some(&OBJECT),
    fields: &[],
};

pub static PLACE: Fragment = Fragment {
    name: "Place",
    parent: Some(&OBJECT),
    fields: &[
        Field::optional("accuracy", Float),
        Field::optional("altitude", Float),
        Field::optional("latitude", Float),
        Field::optional("longitude", Float),
        Field::optional("radius", Float),
        Field::optional("units", Str),
    ],
};

pub static PROFILE: Fragment = Fragment {
    name: "Profile",
    parent: Some(&OBJECT),
    fields: &[Field::optional("describes", Ref)],
};

pub static RELATIONSHIP: Fragment = Fragment {
    name: "Relationship",
    parent: Some(&OBJECT),
    fields: &[
        Field::optional("subject", Ref),
        Field::optional("object", Ref),
        Field::optional("relationship", RefList),
    ],
};

pub static TOMBSTONE: Fragment = Fragment {
    name: "Tombstone",
    parent: Some(&OBJECT),
    fields: &[
        Field::optional("formerType", Str),
        Field::optional("deleted", Timestamp),
    ],
};

// ── Actors ───────────────────────────────────────────────────────────────────

/// Abstract: shared by every actor type, never a discriminator itself.
pub static ACTOR: Fragment = Fragment {
    name: "Actor",
    parent: Some(&OBJECT),
    fields: &[
        Field::optional("inbox", Ref),
        Field::optional("outbox", Ref),
        Field::optional("following", Ref),
        Field::optional("followers", Ref),
        Field::optional("liked", Ref),
        Field::optional("streams", RefList),
        Field::optional("preferredUsername", Str),
    ],
};

pub static APPLICATION: Fragment = Fragment {
    name: "Application",
    parent: Some(&ACTOR),
    fields: &[],
};

pub static GROUP: Fragment = Fragment {
    name: "Group",
    parent: Some(&ACTOR),
    fields: &[],
};

pub static ORGANIZATION: Fragment = Fragment {
    name: "Organization",
    parent: Some(&ACTOR),
    fields: &[],
};

pub static PERSON: Fragment = Fragment {
    name: "Person",
    parent: Some(&ACTOR),
    fields: &[],
};

pub static SERVICE: Fragment = Fragment {
    name: "Service",
    parent: Some(&ACTOR),
    fields: &[],
};

// ── Links ────────────────────────────────────────────────────────────────────

pub static LINK: Fragment = Fragment {
    name: "Link",
    parent: Some(&ENTITY),
    fields: &[
        Field::optional("height", Int),
        Field::optional("href", Str),
        Field::optional("hreflang", Str),
        Field::optional("mediaType", Str),
        Field::optional("name", Str),
        Field::optional("nameMap", LangMap),
        Field::optional("preview", Ref),
        Field::optional("rel", StrList),
        Field::optional("width", Int),
    ],
};

pub static MENTION: Fragment = Fragment {
    name: "Mention",
    parent: Some(&LINK),
    fields: &[],
};

// ── Activities ───────────────────────────────────────────────────────────────

pub static ACTIVITY: Fragment = Fragment {
    name: "Activity",
    parent: Some(&OBJECT),
    fields: &[
        Field::optional("actor", RefList),
        Field::optional("instrument", RefList),
        Field::optional("object", RefList),
        Field::optional("origin", RefList),
        Field::optional("result", RefList),
        Field::optional("target", RefList),
    ],
};

pub static INTRANSITIVE_ACTIVITY: Fragment = Fragment {
    name: "IntransitiveActivity",
    parent: Some(&ACTIVITY),
    fields: &[],
};

pub static ACCEPT: Fragment = Fragment {
    name: "Accept",
    parent: Some(&ACTIVITY),
    fields: &[],
};

pub static TENTATIVE_ACCEPT: Fragment = Fragment {
    name: "TentativeAccept",
    parent: Some(&ACCEPT),
    fields: &[],
};

pub static ADD: Fragment = Fragment {
    name: "Add",
    parent: Some(&ACTIVITY),
    fields: &[],
};

pub static ARRIVE: Fragment = Fragment {
    name: "Arrive",
    parent: Some(&INTRANSITIVE_ACTIVITY),
    fields: &[],
};

pub static CREATE: Fragment = Fragment {
    name: "Create",
    parent: Some(&ACTIVITY),
    fields: &[],
};

pub static DELETE: Fragment = Fragment {
    name: "Delete",
    parent: Some(&ACTIVITY),
    fields: &[],
};

pub static FOLLOW: Fragment = Fragment {
    name: "Follow",
    parent: Some(&ACTIVITY),
    fields: &[],
};

pub static IGNORE: Fragment = Fragment {
    name: "Ignore",
    parent: Some(&ACTIVITY),
    fields: &[],
};

pub static JOIN: Fragment = Fragment {
    name: "Join",
    parent: Some(&ACTIVITY),
    fields: &[],
};

pub static LEAVE: Fragment = Fragment {
    name: "Leave",
    parent: Some(&ACTIVITY),
    fields: &[],
};

pub static LIKE: Fragment = Fragment {
    name: "Like",
    parent: Some(&ACTIVITY),
    fields: &[],
};

pub static OFFER: Fragment = Fragment {
    name: "Offer",
    parent: Some(&ACTIVITY),
    fields: &[],
};

pub static INVITE: Fragment = Fragment {
    name: "Invite",
    parent: Some(&OFFER),
    fields: &[],
};

pub static REJECT: Fragment = Fragment {
    name: "Reject",
    parent: Some(&ACTIVITY),
    fields: &[],
};

pub static TENTATIVE_REJECT: Fragment = Fragment {
    name: "TentativeReject",
    parent: Some(&REJECT),
    fields: &[],
};

pub static REMOVE: Fragment = Fragment {
    name: "Remove",
    parent: Some(&ACTIVITY),
    fields: &[],
};

pub static UNDO: Fragment = Fragment {
    name: "Undo",
    parent: Some(&ACTIVITY),
    fields: &[],
};

pub static UPDATE: Fragment = Fragment {
    name: "Update",
    parent: Some(&ACTIVITY),
    fields: &[],
};

pub static VIEW: Fragment = Fragment {
    name: "View",
    parent: Some(&ACTIVITY),
    fields: &[],
};

pub static LISTEN: Fragment = Fragment {
    name: "Listen",
    parent: Some(&ACTIVITY),
    fields: &[],
};

pub static READ: Fragment = Fragment {
    name: "Read",
    parent: Some(&ACTIVITY),
    fields: &[],
};

pub static MOVE: Fragment = Fragment {
    name: "Move",
    parent: Some(&ACTIVITY),
    fields: &[],
};

pub static TRAVEL: Fragment = Fragment {
    name: "Travel",
    parent: Some(&INTRANSITIVE_ACTIVITY),
    fields: &[],
};

pub static ANNOUNCE: Fragment = Fragment {
    name: "Announce",
    parent: Some(&ACTIVITY),
    fields: &[],
};

pub static BLOCK: Fragment = Fragment {
    name: "Block",
    parent: Some(&IGNORE),
    fields: &[],
};

pub static FLAG: Fragment = Fragment {
    name: "Flag",
    parent: Some(&ACTIVITY),
    fields: &[],
};

pub static DISLIKE: Fragment = Fragment {
    name: "Dislike",
    parent: Some(&ACTIVITY),
    fields: &[],
};

// ── Questions ────────────────────────────────────────────────────────────────

pub static QUESTION: Fragment = Fragment {
    name: "Question",
    parent: Some(&INTRANSITIVE_ACTIVITY),
    fields: &[],
};

/// `Question` carrying `oneOf`: exactly one option may be chosen.
pub static SINGLE_CHOICE_QUESTION: Fragment = Fragment {
    name: "SingleChoiceQuestion",
    parent: Some(&QUESTION),
    fields: &[Field::required("oneOf", RefList)],
};

/// `Question` carrying `anyOf`: several options may be chosen.
pub static MULTIPLE_CHOICE_QUESTION: Fragment = Fragment {
    name: "MultipleChoiceQuestion",
    parent: Some(&QUESTION),
    fields: &[Field::required("anyOf", RefList)],
};

/// `Question` that has been closed, at a time or simply flagged so.
pub static CLOSED_QUESTION: Fragment = Fragment {
    name: "ClosedQuestion",
    parent: Some(&QUESTION),
    fields: &[Field::required("closed", Union)],
};

// ── Collections ──────────────────────────────────────────────────────────────

pub static COLLECTION: Fragment = Fragment {
    name: "Collection",
    parent: Some(&OBJECT),
    fields: &[
        Field::optional("current", Ref),
        Field::optional("first", Ref),
        Field::optional("items", RefList),
        Field::optional("last", Ref),
        Field::optional("totalItems", Int),
    ],
};

pub static ORDERED_COLLECTION: Fragment = Fragment {
    name: "OrderedCollection",
    parent: Some(&COLLECTION),
    fields: &[],
};

pub static COLLECTION_PAGE: Fragment = Fragment {
    name: "CollectionPage",
    parent: Some(&COLLECTION),
    fields: &[
        Field::optional("next", Ref),
        Field::optional("partOf", Ref),
        Field::optional("prev", Ref),
    ],
};

pub static ORDERED_COLLECTION_PAGE: Fragment = Fragment {
    name: "OrderedCollectionPage",
    parent: Some(&COLLECTION_PAGE),
    fields: &[Field::optional("startIndex", Int)],
};
