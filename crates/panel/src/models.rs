use panelsync_models::ServerRecord;
use serde::Deserialize;

/// `{"object": "list", "data": [...], "meta": {...}}` envelope
#[derive(Debug, Deserialize)]
pub struct ListResponse<T> {
    pub data: Vec<Resource<T>>,
    #[serde(default)]
    pub meta: Option<Meta>,
}

#[derive(Debug, Deserialize)]
pub struct Resource<T> {
    pub attributes: T,
}

#[derive(Debug, Deserialize)]
pub struct Meta {
    pub pagination: Option<Pagination>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Pagination {
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub count: u64,
    #[serde(default)]
    pub per_page: u64,
    pub current_page: u32,
    pub total_pages: u32,
}

#[derive(Debug, Deserialize)]
pub struct ServerAttributes {
    pub identifier: String,
    pub uuid: String,
    pub name: String,
    #[serde(default)]
    pub internal_id: Option<u64>,
    #[serde(default)]
    pub docker_image: Option<String>,
    #[serde(default)]
    pub relationships: Option<ServerRelationships>,
}

#[derive(Debug, Deserialize)]
pub struct ServerRelationships {
    #[serde(default)]
    pub egg: Option<Resource<EggAttributes>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EggAttributes {
    pub uuid: String,
    pub name: String,
}

impl From<ServerAttributes> for ServerRecord {
    fn from(attrs: ServerAttributes) -> Self {
        let egg = attrs
            .relationships
            .and_then(|r| r.egg)
            .map(|e| e.attributes);

        ServerRecord {
            id: attrs.internal_id,
            identifier: attrs.identifier,
            uuid: attrs.uuid,
            name: attrs.name,
            egg: egg.as_ref().map(|e| e.name.clone()),
            egg_uuid: egg.map(|e| e.uuid),
            docker_image: attrs.docker_image,
        }
    }
}

/// Entry of a directory listing
#[derive(Debug, Deserialize)]
pub struct FileAttributes {
    pub name: String,
    pub is_file: bool,
}

/// `{"object": "signed_url", "attributes": {"url": "..."}}`
#[derive(Debug, Deserialize)]
pub struct SignedUrl {
    pub attributes: SignedUrlAttributes,
}

#[derive(Debug, Deserialize)]
pub struct SignedUrlAttributes {
    pub url: String,
}
