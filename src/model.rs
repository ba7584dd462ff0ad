use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// Identity key of a game.
///
/// Game ids are always text. Numeric ids coming from callers or from older
/// files are rendered to their textual form, so `GameId::from(5)` and
/// `GameId::from("5")` compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct GameId(String);

impl GameId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for GameId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for GameId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for GameId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl From<&str> for GameId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for GameId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&String> for GameId {
    fn from(value: &String) -> Self {
        Self(value.clone())
    }
}

impl From<&GameId> for GameId {
    fn from(value: &GameId) -> Self {
        value.clone()
    }
}

macro_rules! game_id_from_integer {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for GameId {
                fn from(value: $ty) -> Self {
                    Self(value.to_string())
                }
            }
        )*
    };
}

game_id_from_integer!(i8, i16, i32, i64, u8, u16, u32, u64, usize, isize);

impl Serialize for GameId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

/// Accepts a JSON string, number, bool or null as text.
///
/// Older files were written by a loader that inferred column types, so a
/// text cell like "123" may come back as the number `123`.
struct TextVisitor;

impl<'de> Visitor<'de> for TextVisitor {
    type Value = String;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a string or a number")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<String, E> {
        Ok(v.to_string())
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<String, E> {
        Ok(v)
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<String, E> {
        Ok(v.to_string())
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<String, E> {
        Ok(v.to_string())
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<String, E> {
        Ok(v.to_string())
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<String, E> {
        // Keep the JSON rendering so 5.0 stays "5.0" rather than "5".
        Ok(serde_json::Number::from_f64(v)
            .map(|n| n.to_string())
            .unwrap_or_else(|| v.to_string()))
    }

    fn visit_unit<E: de::Error>(self) -> Result<String, E> {
        Ok(String::new())
    }

    fn visit_none<E: de::Error>(self) -> Result<String, E> {
        Ok(String::new())
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<String, D::Error> {
        deserializer.deserialize_any(TextVisitor)
    }
}

impl<'de> Deserialize<'de> for GameId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(TextVisitor).map(GameId)
    }
}

struct Text(String);

impl<'de> Deserialize<'de> for Text {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(TextVisitor).map(Text)
    }
}

fn default_availability() -> bool {
    true
}

fn text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(TextVisitor)
}

fn text_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let items = Option::<Vec<Text>>::deserialize(deserializer)?.unwrap_or_default();
    Ok(items.into_iter().map(|Text(item)| item).collect())
}

fn null_as_available<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or(true))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Referee {
    #[serde(rename = "Name", default, deserialize_with = "text")]
    pub name: String,
    #[serde(rename = "Expertise", default, deserialize_with = "text")]
    pub expertise: String,
    #[serde(
        rename = "Availability",
        default = "default_availability",
        deserialize_with = "null_as_available"
    )]
    pub availability: bool,
}

impl Referee {
    /// New referees are always available.
    pub fn new(name: impl Into<String>, expertise: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            expertise: expertise.into(),
            availability: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    #[serde(rename = "Game ID", default)]
    pub game_id: GameId,
    #[serde(rename = "Game Name", default, deserialize_with = "text")]
    pub game_name: String,
    /// Referee names in assignment order. Entries are not re-checked after a
    /// referee is removed.
    #[serde(
        rename = "Assigned Referees",
        default,
        deserialize_with = "text_list"
    )]
    pub assigned_referees: Vec<String>,
}

impl Game {
    pub fn new(game_id: impl Into<GameId>, game_name: impl Into<String>) -> Self {
        Self {
            game_id: game_id.into(),
            game_name: game_name.into(),
            assigned_referees: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feedback {
    #[serde(rename = "Game ID", default)]
    pub game_id: GameId,
    #[serde(rename = "Referee Name", default, deserialize_with = "text")]
    pub referee_name: String,
    #[serde(rename = "Performance", default, deserialize_with = "text")]
    pub performance: String,
}

impl Feedback {
    pub fn new(
        game_id: impl Into<GameId>,
        referee_name: impl Into<String>,
        performance: impl Into<String>,
    ) -> Self {
        Self {
            game_id: game_id.into(),
            referee_name: referee_name.into(),
            performance: performance.into(),
        }
    }
}
