use crate::db::DatabaseError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Macro to generate enum with as_str + std::str::FromStr pattern.
/// Serde round-trips through the same strings the database stores.
macro_rules! str_enum {
    ($name:ident { $($variant:ident => $s:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $s),+
                }
            }
        }

        impl std::str::FromStr for $name {
            type Err = DatabaseError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($s => Ok(Self::$variant)),+,
                    _ => Err(DatabaseError::InvalidEnum {
                        field: stringify!($name).into(),
                        value: s.into(),
                    }),
                }
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let s = String::deserialize(deserializer)?;
                s.parse().map_err(serde::de::Error::custom)
            }
        }
    };
}

str_enum!(QueryCategory {
    Doctor => "doctor",
    Specialty => "specialty",
    Clinic => "clinic",
    General => "general",
});

str_enum!(DoctorIntent {
    Price => "price",
    Female => "female",
    Male => "male",
    Young => "young",
    Senior => "senior",
    TopReview => "topreview",
    Compare => "compare",
    Default => "default",
});

str_enum!(SpecialtyIntent {
    Symptom => "symptom",
    Default => "default",
});
