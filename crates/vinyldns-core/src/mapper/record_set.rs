use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use super::non_empty;
use crate::error::{Error, Result};
use crate::model::{Record, RecordSet};

/// Attributes of a `vinyldns_record_set` resource
///
/// `name`, `zone_id` and `type` force a new resource when changed; the
/// framework handles that, so updates simply resend them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordSetAttributes {
    pub name: String,
    pub zone_id: String,
    #[serde(rename = "type")]
    pub record_type: String,
    /// Serialized as null when unset so a read clears a stale value
    #[serde(default)]
    pub owner_group_id: Option<String>,
    #[serde(default)]
    pub ttl: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub record_addresses: Option<BTreeSet<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub record_texts: Option<BTreeSet<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub record_nsdnames: Option<BTreeSet<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub record_ptrdnames: Option<BTreeSet<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub record_cname: Option<String>,
}

/// DNS record types the provider can manage
///
/// SOA records are read-only in VinylDNS and have no variant; parsing one
/// fails with a validation error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordType {
    A,
    Aaaa,
    Cname,
    Txt,
    Ns,
    Ptr,
}

impl RecordType {
    /// Canonical upper-case name as used by the API
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordType::A => "A",
            RecordType::Aaaa => "AAAA",
            RecordType::Cname => "CNAME",
            RecordType::Txt => "TXT",
            RecordType::Ns => "NS",
            RecordType::Ptr => "PTR",
        }
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecordType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_uppercase().as_str() {
            "A" => Ok(RecordType::A),
            "AAAA" => Ok(RecordType::Aaaa),
            "CNAME" => Ok(RecordType::Cname),
            "TXT" => Ok(RecordType::Txt),
            "NS" => Ok(RecordType::Ns),
            "PTR" => Ok(RecordType::Ptr),
            "SOA" => Err(Error::validation(
                "soa records are not currently supported by vinyldns",
            )),
            _ => Err(Error::validation(format!(
                "unsupported record type: {s:?}"
            ))),
        }
    }
}

/// Type-specific payload of a record set
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordData {
    /// A and AAAA
    Address(BTreeSet<String>),
    CName(String),
    Text(BTreeSet<String>),
    NsName(BTreeSet<String>),
    PtrName(BTreeSet<String>),
}

/// Strip IPv6 literal brackets; the API rejects `[2001:db8::1]` with a 400
pub fn remove_brackets(address: &str) -> String {
    address.replace(['[', ']'], "")
}

fn ensure_absolute(name: &str, attribute: &str) -> Result<()> {
    if name.ends_with('.') {
        Ok(())
    } else {
        Err(Error::validation(format!(
            "{attribute} value must end in trailing '.', got {name:?}"
        )))
    }
}

impl RecordData {
    /// Select and validate the payload matching the declared type
    pub fn from_attributes(attrs: &RecordSetAttributes) -> Result<Self> {
        let set = |values: &Option<BTreeSet<String>>| values.clone().unwrap_or_default();

        match attrs.record_type.parse::<RecordType>()? {
            RecordType::A | RecordType::Aaaa => Ok(RecordData::Address(
                set(&attrs.record_addresses)
                    .iter()
                    .map(|a| remove_brackets(a))
                    .collect(),
            )),
            RecordType::Cname => {
                let cname = non_empty(&attrs.record_cname).ok_or_else(|| {
                    Error::validation("record_cname is required for CNAME record sets")
                })?;
                ensure_absolute(&cname, "record_cname")?;
                Ok(RecordData::CName(cname))
            }
            RecordType::Txt => Ok(RecordData::Text(set(&attrs.record_texts))),
            RecordType::Ns => Ok(RecordData::NsName(set(&attrs.record_nsdnames))),
            RecordType::Ptr => {
                let names = set(&attrs.record_ptrdnames);
                for name in &names {
                    ensure_absolute(name, "record_ptrdnames")?;
                }
                Ok(RecordData::PtrName(names))
            }
        }
    }

    /// Rebuild the payload from the records of an API response
    pub fn from_records(record_type: RecordType, records: &[Record]) -> Result<Self> {
        let collect = |field: fn(&Record) -> Option<&String>| -> BTreeSet<String> {
            records.iter().filter_map(field).cloned().collect()
        };

        match record_type {
            RecordType::A | RecordType::Aaaa => Ok(RecordData::Address(
                records
                    .iter()
                    .filter_map(|r| r.address.as_deref())
                    .map(remove_brackets)
                    .collect(),
            )),
            RecordType::Cname => records
                .iter()
                .find_map(|r| r.cname.clone())
                .map(RecordData::CName)
                .ok_or_else(|| Error::Other("CNAME record set has no cname record".to_string())),
            RecordType::Txt => Ok(RecordData::Text(collect(|r| r.text.as_ref()))),
            RecordType::Ns => Ok(RecordData::NsName(collect(|r| r.nsdname.as_ref()))),
            RecordType::Ptr => Ok(RecordData::PtrName(collect(|r| r.ptrdname.as_ref()))),
        }
    }

    /// Records to send to the API
    pub fn to_records(&self) -> Vec<Record> {
        match self {
            RecordData::Address(values) => values
                .iter()
                .map(|v| Record {
                    address: Some(v.clone()),
                    ..Record::default()
                })
                .collect(),
            RecordData::CName(cname) => vec![Record {
                cname: Some(cname.clone()),
                ..Record::default()
            }],
            RecordData::Text(values) => values
                .iter()
                .map(|v| Record {
                    text: Some(v.clone()),
                    ..Record::default()
                })
                .collect(),
            RecordData::NsName(values) => values
                .iter()
                .map(|v| Record {
                    nsdname: Some(v.clone()),
                    ..Record::default()
                })
                .collect(),
            RecordData::PtrName(values) => values
                .iter()
                .map(|v| Record {
                    ptrdname: Some(v.clone()),
                    ..Record::default()
                })
                .collect(),
        }
    }

    /// Write the payload into the matching attribute
    pub fn project(&self, attrs: &mut RecordSetAttributes) {
        match self {
            RecordData::Address(values) => attrs.record_addresses = Some(values.clone()),
            RecordData::CName(cname) => attrs.record_cname = Some(cname.clone()),
            RecordData::Text(values) => attrs.record_texts = Some(values.clone()),
            RecordData::NsName(values) => attrs.record_nsdnames = Some(values.clone()),
            RecordData::PtrName(values) => attrs.record_ptrdnames = Some(values.clone()),
        }
    }
}

impl RecordSetAttributes {
    /// Build the API request; `id` is set for updates
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] for SOA or unknown types and for CNAME
    /// or PTR targets that are not absolute names.
    pub fn to_request(&self, id: Option<&str>) -> Result<RecordSet> {
        let data = RecordData::from_attributes(self)?;

        Ok(RecordSet {
            id: id.unwrap_or_default().to_string(),
            zone_id: self.zone_id.clone(),
            name: self.name.clone(),
            record_type: self.record_type.clone(),
            ttl: self.ttl,
            records: data.to_records(),
            owner_group_id: non_empty(&self.owner_group_id),
            ..RecordSet::default()
        })
    }

    /// Project an API response onto resource attributes
    ///
    /// Only the value attribute matching the record type is populated.
    pub fn from_response(record_set: &RecordSet) -> Result<Self> {
        let record_type: RecordType = record_set.record_type.parse()?;
        let data = RecordData::from_records(record_type, &record_set.records)?;

        let mut attrs = Self {
            name: record_set.name.clone(),
            zone_id: record_set.zone_id.clone(),
            record_type: record_set.record_type.clone(),
            owner_group_id: record_set.owner_group_id.clone(),
            ttl: record_set.ttl,
            ..Self::default()
        };
        data.project(&mut attrs);

        Ok(attrs)
    }
}
