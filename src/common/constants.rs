// doc constants
pub const DOC_ID: &str = "id";
pub const DOC_CREATED_AT: &str = "createdAt";
pub const DOC_UPDATED_AT: &str = "updatedAt";
pub const RESERVED_FIELDS: [&str; 3] = [DOC_ID, DOC_CREATED_AT, DOC_UPDATED_AT];

// Compile-time assertion for reserved fields count
const _: () = {
    const RESERVED_FIELDS_COUNT: usize = 3;
    const ACTUAL_COUNT: usize = RESERVED_FIELDS.len();
    const _: [(); 1] = [(); (ACTUAL_COUNT == RESERVED_FIELDS_COUNT) as usize];
};

// storage constants
pub const COLLECTION_FILE_EXT: &str = "json";
pub const TEMP_FILE_EXT: &str = "tmp";
pub const EMPTY_COLLECTION: &str = "[]";
pub const BACKUP_DIR_PREFIX: &str = "backup-";

// filter constants
pub const FIELD_SEPARATOR: char = '.';

pub const JOTDB_VERSION: &str = env!("CARGO_PKG_VERSION");
