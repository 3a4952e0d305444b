//! Database property collection
//!
//! A container's `bucketInfo` is a flat map of database settings, each read with
//! one admin query. The three linked-database settings return the linked
//! database's name rather than its id.

use std::collections::BTreeMap;

use serde_json::{Map, Value};
use tracing::debug;

use crate::indexes::RawResponse;

const ADMIN_PROLOG: &str = "import module namespace admin = \"http://marklogic.com/xdmp/admin\" at \"/MarkLogic/admin.xqy\"; let $config := admin:get-configuration()";

/// One database setting and the admin getter that reads it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DatabaseProperty {
    pub keyword: &'static str,
    pub getter: &'static str,
    /// Getter returns a database id that is resolved to its name
    pub resolves_name: bool,
}

impl DatabaseProperty {
    const fn value(keyword: &'static str, getter: &'static str) -> Self {
        Self {
            keyword,
            getter,
            resolves_name: false,
        }
    }

    const fn database_name(keyword: &'static str, getter: &'static str) -> Self {
        Self {
            keyword,
            getter,
            resolves_name: true,
        }
    }

    /// XQuery reading this setting for a database
    pub fn admin_query(&self, db_name: &str) -> String {
        if self.resolves_name {
            format!(
                "{} let $linkedDbId := admin:{}($config, xdmp:database(\"{}\")) return admin:database-get-name($config, $linkedDbId)",
                ADMIN_PROLOG, self.getter, db_name
            )
        } else {
            format!(
                "{} return admin:{}($config, xdmp:database(\"{}\"))",
                ADMIN_PROLOG, self.getter, db_name
            )
        }
    }
}

/// Every setting collected into `bucketInfo`, in query order
pub static DATABASE_PROPERTIES: [DatabaseProperty; 61] = [
    DatabaseProperty::database_name("securityDB", "database-get-security-database"),
    DatabaseProperty::database_name("schemaDB", "database-get-schema-database"),
    DatabaseProperty::database_name("triggersDB", "database-get-triggers-database"),
    DatabaseProperty::value("dataEncryption", "database-get-data-encryption"),
    DatabaseProperty::value("language", "database-get-language"),
    DatabaseProperty::value("stemmedSearches", "database-get-stemmed-searches"),
    DatabaseProperty::value("wordSearches", "database-get-word-searches"),
    DatabaseProperty::value("wordPositions", "database-get-word-positions"),
    DatabaseProperty::value("fastPhraseSearches", "database-get-fast-phrase-searches"),
    DatabaseProperty::value("fastReverseSearches", "database-get-fast-reverse-searches"),
    DatabaseProperty::value("tripleIndex", "database-get-triple-index"),
    DatabaseProperty::value("triplePositions", "database-get-triple-positions"),
    DatabaseProperty::value("fastCaseSensitiveSearches", "database-get-fast-case-sensitive-searches"),
    DatabaseProperty::value("fastdiacriticSensitiveSearches", "database-get-fast-diacritic-sensitive-searches"),
    DatabaseProperty::value("fastElementWordSearches", "database-get-fast-element-word-searches"),
    DatabaseProperty::value("elementWordPositions", "database-get-element-word-positions"),
    DatabaseProperty::value("fastElementPhraseSearches", "database-get-fast-element-phrase-searches"),
    DatabaseProperty::value("elementValuePositions", "database-get-element-value-positions"),
    DatabaseProperty::value("attributeValuePositions", "database-get-attribute-value-positions"),
    DatabaseProperty::value("threeCharacterSearches", "database-get-three-character-searches"),
    DatabaseProperty::value("threeCharacterWordPositions", "database-get-three-character-word-positions"),
    DatabaseProperty::value("fastElementCharacterSearches", "database-get-fast-element-character-searches"),
    DatabaseProperty::value("trailingWildcardSearches", "database-get-trailing-wildcard-searches"),
    DatabaseProperty::value("trailingWildcardWordPositions", "database-get-trailing-wildcard-word-positions"),
    DatabaseProperty::value("fastElementTrailingWildcardSearches", "database-get-fast-element-trailing-wildcard-searches"),
    DatabaseProperty::value("twoCharacterSearches", "database-get-two-character-searches"),
    DatabaseProperty::value("oneCharacterSearches", "database-get-one-character-searches"),
    DatabaseProperty::value("uriLexicon", "database-get-uri-lexicon"),
    DatabaseProperty::value("collectionLexicon", "database-get-collection-lexicon"),
    DatabaseProperty::value("reindexerEnable", "database-get-reindexer-enable"),
    DatabaseProperty::value("reindexerThrottle", "database-get-reindexer-throttle"),
    DatabaseProperty::value("reindexerTimestamp", "database-get-reindexer-timestamp"),
    DatabaseProperty::value("directoryCreation", "database-get-directory-creation"),
    DatabaseProperty::value("maintainLastModified", "database-get-maintain-last-modified"),
    DatabaseProperty::value("maintainDirectoryLastModified", "database-get-maintain-directory-last-modified"),
    DatabaseProperty::value("inheritPermissions", "database-get-inherit-permissions"),
    DatabaseProperty::value("inheritCollections", "database-get-inherit-collections"),
    DatabaseProperty::value("inheritQuality", "database-get-inherit-quality"),
    DatabaseProperty::value("inMemoryLimit", "database-get-in-memory-limit"),
    DatabaseProperty::value("inMemoryListSize", "database-get-in-memory-list-size"),
    DatabaseProperty::value("inMemoryTreeSize", "database-get-in-memory-tree-size"),
    DatabaseProperty::value("inMemoryRangeIndexSize", "database-get-in-memory-range-index-size"),
    DatabaseProperty::value("inMemoryReverseIndexSize", "database-get-in-memory-reverse-index-size"),
    DatabaseProperty::value("inMemoryTripleIndexSize", "database-get-in-memory-triple-index-size"),
    DatabaseProperty::value("inMemoryGeospatialRegionIndexSize", "database-get-in-memory-geospatial-region-index-size"),
    DatabaseProperty::value("largeSizeThreshold", "database-get-large-size-threshold"),
    DatabaseProperty::value("locking", "database-get-locking"),
    DatabaseProperty::value("journaling", "database-get-journaling"),
    DatabaseProperty::value("journalSize", "database-get-journal-size"),
    DatabaseProperty::value("preallocateJournals", "database-get-preallocate-journals"),
    DatabaseProperty::value("preloadMappedData", "database-get-preload-mapped-data"),
    DatabaseProperty::value("preloadReplicaMappedData", "database-get-preload-replica-mapped-data"),
    DatabaseProperty::value("rangeIndexOptimize", "database-get-range-index-optimize"),
    DatabaseProperty::value("positionsListMaxSize", "database-get-positions-list-max-size"),
    DatabaseProperty::value("formatCompatibility", "database-get-format-compatibility"),
    DatabaseProperty::value("indexDetection", "database-get-index-detection"),
    DatabaseProperty::value("expungeLocks", "database-get-expunge-locks"),
    DatabaseProperty::value("tfNormalization", "database-get-tf-normalization"),
    DatabaseProperty::value("rebalancerEnable", "database-get-rebalancer-enable"),
    DatabaseProperty::value("rebalancerThrottle", "database-get-rebalancer-throttle"),
    DatabaseProperty::value("assignmentPolicy", "database-get-assignment-policy"),
];

/// Look up a setting by keyword
pub fn property(keyword: &str) -> Option<&'static DatabaseProperty> {
    DATABASE_PROPERTIES.iter().find(|p| p.keyword == keyword)
}

/// Fold per-keyword query responses into the `bucketInfo` map
///
/// Each setting takes the `value` of its first response element. Settings
/// missing from `responses` (failed queries) or answered with an empty
/// response are omitted.
pub fn collect_properties(responses: &BTreeMap<String, Vec<RawResponse>>) -> Map<String, Value> {
    let mut info = Map::new();

    for prop in DATABASE_PROPERTIES.iter() {
        let Some(response) = responses.get(prop.keyword) else {
            continue;
        };
        match response.first() {
            Some(first) => {
                info.insert(prop.keyword.to_string(), first.value.clone());
            }
            None => debug!("Empty response for database property {}", prop.keyword),
        }
    }

    info
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_table_is_complete_and_unique() {
        assert_eq!(DATABASE_PROPERTIES.len(), 61);
        let mut keywords: Vec<&str> = DATABASE_PROPERTIES.iter().map(|p| p.keyword).collect();
        keywords.sort_unstable();
        keywords.dedup();
        assert_eq!(keywords.len(), 61);
    }

    #[test]
    fn test_linked_database_queries_resolve_names() {
        let schema_db = property("schemaDB").unwrap();
        assert!(schema_db.resolves_name);
        let query = schema_db.admin_query("Documents");
        assert!(query.contains("admin:database-get-schema-database($config, xdmp:database(\"Documents\"))"));
        assert!(query.ends_with("return admin:database-get-name($config, $linkedDbId)"));

        let language = property("language").unwrap();
        assert_eq!(
            language.admin_query("Documents"),
            format!(
                "{} return admin:database-get-language($config, xdmp:database(\"Documents\"))",
                ADMIN_PROLOG
            )
        );
    }

    #[test]
    fn test_collect_properties_omits_failures() {
        let mut responses = BTreeMap::new();
        responses.insert(
            "language".to_string(),
            vec![RawResponse {
                value: json!("en"),
                ..RawResponse::default()
            }],
        );
        responses.insert("locking".to_string(), Vec::new());
        responses.insert(
            "unknownSetting".to_string(),
            vec![RawResponse {
                value: json!(1),
                ..RawResponse::default()
            }],
        );

        let info = collect_properties(&responses);
        assert_eq!(Value::Object(info), json!({"language": "en"}));
    }
}
