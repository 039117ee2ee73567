//! Record-context accumulator for lifecycle coordinators.
//!
//! A coordinator handling a UI event (record opened, a field changed, save)
//! calls a cascade of domain services. Each service contributes field values,
//! attribute updates and user notifications into a [`RecordContext`], which the
//! API returns to the client as a patch.

use std::collections::BTreeMap;

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::i18n::{Catalog, Locale, Message};
use crate::id::UserId;

/// Field name → value patch.
pub type Values = BTreeMap<String, Value>;

/// Field name → attribute name → value (e.g. `"dueDate" -> "hidden" -> true`).
pub type Attrs = BTreeMap<String, BTreeMap<String, Value>>;

/// Accumulated result of a lifecycle event.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordContext {
    values: Values,
    attrs: Attrs,
    flash: Vec<Message>,
    notify: Vec<Message>,
    alert: Vec<Message>,
    info: Vec<Message>,
}

impl RecordContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn put_value(&mut self, field: impl Into<String>, value: impl Into<Value>) {
        self.values.insert(field.into(), value.into());
    }

    pub fn put_in_values(&mut self, values: Values) {
        self.values.extend(values);
    }

    pub fn put_attr(
        &mut self,
        field: impl Into<String>,
        attr: impl Into<String>,
        value: impl Into<Value>,
    ) {
        self.attrs
            .entry(field.into())
            .or_default()
            .insert(attr.into(), value.into());
    }

    pub fn put_in_attrs(&mut self, attrs: Attrs) {
        for (field, field_attrs) in attrs {
            self.attrs.entry(field).or_default().extend(field_attrs);
        }
    }

    pub fn put_in_flash(&mut self, msg: impl Into<Message>) {
        self.flash.push(msg.into());
    }

    pub fn put_in_notify(&mut self, msg: impl Into<Message>) {
        self.notify.push(msg.into());
    }

    pub fn put_in_alert(&mut self, msg: impl Into<Message>) {
        self.alert.push(msg.into());
    }

    pub fn put_in_info(&mut self, msg: impl Into<Message>) {
        self.info.push(msg.into());
    }

    /// Fold another context into this one. Later values win per key; messages
    /// are appended in order.
    pub fn merge(&mut self, other: RecordContext) {
        self.put_in_values(other.values);
        self.put_in_attrs(other.attrs);
        self.flash.extend(other.flash);
        self.notify.extend(other.notify);
        self.alert.extend(other.alert);
        self.info.extend(other.info);
    }

    pub fn values(&self) -> &Values {
        &self.values
    }

    pub fn attrs(&self) -> &Attrs {
        &self.attrs
    }

    pub fn value(&self, field: &str) -> Option<&Value> {
        self.values.get(field)
    }

    pub fn attr(&self, field: &str, attr: &str) -> Option<&Value> {
        self.attrs.get(field).and_then(|a| a.get(attr))
    }

    pub fn flash(&self) -> &[Message] {
        &self.flash
    }

    pub fn notify(&self) -> &[Message] {
        &self.notify
    }

    pub fn alert(&self) -> &[Message] {
        &self.alert
    }

    pub fn info(&self) -> &[Message] {
        &self.info
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
            && self.attrs.is_empty()
            && self.flash.is_empty()
            && self.notify.is_empty()
            && self.alert.is_empty()
            && self.info.is_empty()
    }

    /// Render into the wire payload, translating messages.
    pub fn into_response(self, catalog: &Catalog, locale: Locale) -> RecordContextResponse {
        let render = |msgs: Vec<Message>| -> Vec<String> {
            msgs.iter().map(|m| m.render(catalog, locale)).collect()
        };
        RecordContextResponse {
            values: self.values,
            attrs: self.attrs,
            flash: render(self.flash),
            notify: render(self.notify),
            alert: render(self.alert),
            info: render(self.info),
        }
    }
}

/// Serialized form of a [`RecordContext`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordContextResponse {
    #[serde(default)]
    pub values: Values,
    #[serde(default)]
    pub attrs: Attrs,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub flash: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub notify: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub alert: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub info: Vec<String>,
}

/// Serialize a value for a context patch.
///
/// Domain types serialize infallibly in practice; a failure is logged and
/// rendered as `null`.
pub fn to_json<T: Serialize>(value: &T) -> Value {
    serde_json::to_value(value).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "failed to serialize context value");
        Value::Null
    })
}

/// Request-side context of a lifecycle event.
///
/// Holds the acting user, today's business date and the non-persistent
/// `$`-prefixed fields the client sends along with the record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionContext {
    #[serde(default)]
    pub user_id: Option<UserId>,
    #[serde(default)]
    pub roles: Vec<String>,
    #[serde(default = "today")]
    pub today: NaiveDate,
    #[serde(default)]
    pub locale: Locale,
    #[serde(default)]
    pub values: Values,
}

fn today() -> NaiveDate {
    Utc::now().date_naive()
}

impl Default for ActionContext {
    fn default() -> Self {
        Self {
            user_id: None,
            roles: Vec::new(),
            today: today(),
            locale: Locale::default(),
            values: Values::new(),
        }
    }
}

impl ActionContext {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            today,
            ..Self::default()
        }
    }

    pub fn with_user(mut self, user_id: UserId, roles: Vec<String>) -> Self {
        self.user_id = Some(user_id);
        self.roles = roles;
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    pub fn put(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.values.insert(key.into(), value.into());
    }

    /// Boolean flag lookup; missing or non-boolean values read as `false`.
    pub fn flag(&self, key: &str) -> bool {
        self.values.get(key).and_then(Value::as_bool).unwrap_or(false)
    }

    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }
}
