//! Android binary XML decoder
//!
//! Just enough of the compiled `AndroidManifest.xml` format to read element
//! names and attribute values: the string pool, the resource-id map and
//! start-element chunks. Everything else is skipped by chunk size.

const CHUNK_XML: u16 = 0x0003;
const CHUNK_STRING_POOL: u16 = 0x0001;
const CHUNK_RESOURCE_MAP: u16 = 0x0180;
const CHUNK_START_ELEMENT: u16 = 0x0102;

const UTF8_FLAG: u32 = 1 << 8;
const NO_INDEX: u32 = 0xFFFF_FFFF;

const TYPE_REFERENCE: u8 = 0x01;
const TYPE_STRING: u8 = 0x03;
const TYPE_INT_DEC: u8 = 0x10;
const TYPE_INT_HEX: u8 = 0x11;
const TYPE_INT_BOOLEAN: u8 = 0x12;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttrValue {
    String(String),
    /// A resource reference (`@string/app_name`), not resolvable here.
    Reference(u32),
    Int(i64),
    Bool(bool),
    Other { data_type: u8, data: u32 },
}

impl AttrValue {
    pub fn as_text(&self) -> Option<String> {
        match self {
            AttrValue::String(s) => Some(s.clone()),
            AttrValue::Int(i) => Some(i.to_string()),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    /// Android framework resource id of the attribute name, if mapped.
    pub resource_id: Option<u32>,
    pub value: AttrValue,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub name: String,
    pub attributes: Vec<Attribute>,
}

impl Element {
    /// Look up an attribute by local name, falling back to its resource id
    /// for manifests whose attribute names were stripped.
    pub fn attr(&self, name: &str, resource_id: u32) -> Option<&AttrValue> {
        self.attributes
            .iter()
            .find(|a| a.name == name)
            .or_else(|| {
                self.attributes
                    .iter()
                    .find(|a| a.resource_id == Some(resource_id))
            })
            .map(|a| &a.value)
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("{0}")]
pub struct AxmlError(String);

fn err<T>(msg: impl Into<String>) -> Result<T, AxmlError> {
    Err(AxmlError(msg.into()))
}

struct Reader<'a> {
    data: &'a [u8],
}

impl<'a> Reader<'a> {
    fn u8(&self, at: usize) -> Result<u8, AxmlError> {
        match self.data.get(at) {
            Some(b) => Ok(*b),
            None => err(format!("unexpected end of data at {at}")),
        }
    }

    fn u16(&self, at: usize) -> Result<u16, AxmlError> {
        Ok(u16::from_le_bytes([self.u8(at)?, self.u8(at + 1)?]))
    }

    fn u32(&self, at: usize) -> Result<u32, AxmlError> {
        Ok(u32::from_le_bytes([
            self.u8(at)?,
            self.u8(at + 1)?,
            self.u8(at + 2)?,
            self.u8(at + 3)?,
        ]))
    }

    fn slice(&self, at: usize, len: usize) -> Result<&'a [u8], AxmlError> {
        match at.checked_add(len).and_then(|end| self.data.get(at..end)) {
            Some(s) => Ok(s),
            None => err(format!("range {at}+{len} out of bounds")),
        }
    }
}

struct StringPool {
    strings: Vec<String>,
}

impl StringPool {
    fn get(&self, index: u32) -> Result<String, AxmlError> {
        if index == NO_INDEX {
            return Ok(String::new());
        }
        match self.strings.get(index as usize) {
            Some(s) => Ok(s.clone()),
            None => err(format!("string index {index} out of range")),
        }
    }

    fn parse(r: &Reader<'_>, chunk: usize) -> Result<Self, AxmlError> {
        let count = r.u32(chunk + 8)? as usize;
        let flags = r.u32(chunk + 16)?;
        let strings_start = chunk + r.u32(chunk + 20)? as usize;
        let header_size = r.u16(chunk + 2)? as usize;
        let utf8 = flags & UTF8_FLAG != 0;

        let mut strings = Vec::with_capacity(count.min(4096));
        for i in 0..count {
            let offset = r.u32(chunk + header_size + i * 4)? as usize;
            let at = strings_start + offset;
            let s = if utf8 {
                decode_utf8(r, at)?
            } else {
                decode_utf16(r, at)?
            };
            strings.push(s);
        }
        Ok(Self { strings })
    }
}

fn decode_utf8(r: &Reader<'_>, at: usize) -> Result<String, AxmlError> {
    // Character count, then byte count; each is one byte or two with the
    // high bit set on the first.
    let (_, at) = utf8_len(r, at)?;
    let (len, at) = utf8_len(r, at)?;
    let bytes = r.slice(at, len)?;
    Ok(String::from_utf8_lossy(bytes).into_owned())
}

fn utf8_len(r: &Reader<'_>, at: usize) -> Result<(usize, usize), AxmlError> {
    let first = r.u8(at)? as usize;
    if first & 0x80 != 0 {
        let second = r.u8(at + 1)? as usize;
        Ok((((first & 0x7F) << 8) | second, at + 2))
    } else {
        Ok((first, at + 1))
    }
}

fn decode_utf16(r: &Reader<'_>, at: usize) -> Result<String, AxmlError> {
    let first = r.u16(at)? as usize;
    let (len, at) = if first & 0x8000 != 0 {
        let second = r.u16(at + 2)? as usize;
        (((first & 0x7FFF) << 16) | second, at + 4)
    } else {
        (first, at + 2)
    };
    let units = (0..len)
        .map(|i| r.u16(at + i * 2))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(String::from_utf16_lossy(&units))
}

/// Decode every start element of a compiled XML document, in document order.
pub fn parse_elements(data: &[u8]) -> Result<Vec<Element>, AxmlError> {
    let r = Reader { data };
    if r.u16(0)? != CHUNK_XML {
        return err("not a binary XML document");
    }
    let header_size = r.u16(2)? as usize;
    let total = (r.u32(4)? as usize).min(data.len());

    let mut pool: Option<StringPool> = None;
    let mut resource_ids: Vec<u32> = Vec::new();
    let mut elements = Vec::new();

    let mut at = header_size;
    while at + 8 <= total {
        let chunk_type = r.u16(at)?;
        let chunk_header = r.u16(at + 2)? as usize;
        let chunk_size = r.u32(at + 4)? as usize;
        if chunk_size < 8 {
            return err(format!("invalid chunk size {chunk_size} at {at}"));
        }

        match chunk_type {
            CHUNK_STRING_POOL => pool = Some(StringPool::parse(&r, at)?),
            CHUNK_RESOURCE_MAP => {
                let count = chunk_size.saturating_sub(chunk_header) / 4;
                resource_ids = (0..count)
                    .map(|i| r.u32(at + chunk_header + i * 4))
                    .collect::<Result<_, _>>()?;
            }
            CHUNK_START_ELEMENT => {
                let Some(pool) = pool.as_ref() else {
                    return err("element before string pool");
                };
                elements.push(parse_start_element(&r, at, chunk_header, pool, &resource_ids)?);
            }
            _ => {}
        }

        at += chunk_size;
    }

    Ok(elements)
}

fn parse_start_element(
    r: &Reader<'_>,
    chunk: usize,
    header_size: usize,
    pool: &StringPool,
    resource_ids: &[u32],
) -> Result<Element, AxmlError> {
    let ext = chunk + header_size;
    let name = pool.get(r.u32(ext + 4)?)?;
    let attribute_start = r.u16(ext + 8)? as usize;
    let attribute_size = r.u16(ext + 10)? as usize;
    let attribute_count = r.u16(ext + 12)? as usize;

    let mut attributes = Vec::with_capacity(attribute_count);
    for i in 0..attribute_count {
        let a = ext + attribute_start + i * attribute_size;
        let name_idx = r.u32(a + 4)?;
        let raw = r.u32(a + 8)?;
        let data_type = r.u8(a + 15)?;
        let data = r.u32(a + 16)?;

        let value = if raw != NO_INDEX {
            AttrValue::String(pool.get(raw)?)
        } else {
            match data_type {
                TYPE_STRING => AttrValue::String(pool.get(data)?),
                TYPE_REFERENCE => AttrValue::Reference(data),
                TYPE_INT_DEC | TYPE_INT_HEX => AttrValue::Int(data as i32 as i64),
                TYPE_INT_BOOLEAN => AttrValue::Bool(data != 0),
                _ => AttrValue::Other { data_type, data },
            }
        };

        attributes.push(Attribute {
            name: pool.get(name_idx)?,
            resource_id: resource_ids.get(name_idx as usize).copied(),
            value,
        });
    }

    Ok(Element { name, attributes })
}
