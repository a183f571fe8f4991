//! Declaration dumps shared by the integration tests

/// A converter declared with comment tags, its abstract parent and an
/// interface contributing a property
pub const CONVERTERS: &str = r#"{
  "classes": [
    {
      "name": "org.example.convert.AbstractConverter",
      "comment": "Base of all converters.",
      "tags": [
        { "name": "JSFConverter", "params": { "configExcluded": "true" } }
      ],
      "methods": [
        {
          "name": "setFor",
          "parameters": [{ "name": "forId", "type": "String" }],
          "tags": [{ "name": "JSFProperty", "params": { "desc": "Id of the target component" } }]
        }
      ]
    },
    {
      "name": "org.example.convert.PatternHolder",
      "isInterface": true,
      "methods": [
        {
          "name": "getPattern",
          "returnType": "String",
          "isAbstract": true,
          "annotations": [{ "name": "JSFProperty", "params": { "required": true } }]
        }
      ]
    },
    {
      "name": "org.example.convert.MyConverter",
      "superclass": "org.example.convert.AbstractConverter",
      "interfaces": ["org.example.convert.PatternHolder"],
      "comment": "Formats values using a pattern. Used by the sample pages.",
      "tags": [
        {
          "name": "JSFConverter",
          "params": {
            "id": "myConv",
            "name": "ex:convertPattern",
            "tagClass": "org.example.taglib.ConvertPatternTag",
            "bodyContent": "empty"
          }
        }
      ],
      "methods": [
        {
          "name": "getPattern",
          "returnType": "String"
        },
        {
          "name": "setLocale",
          "parameters": [{ "name": "locale", "type": "java.util.Locale" }],
          "annotations": [{ "name": "JSFProperty", "params": { "literalOnly": true } }],
          "comment": "Locale used while formatting."
        }
      ]
    }
  ]
}"#;

/// One class per remaining kind: a template tag group, a function holder and a
/// generic tag
pub const TAGS: &str = r#"{
  "classes": [
    {
      "name": "org.example.tags.IncludeHandler",
      "comment": "Includes another view.",
      "annotations": [
        {
          "name": "JSFFaceletTags",
          "params": {
            "tags": [
              { "name": "JSFFaceletTag", "params": { "name": "ex:include", "tagClass": "org.example.taglib.IncludeTag" } },
              { "name": "JSFFaceletTag", "params": { "name": "ex:decorate", "bodyContent": "tagdependent" } }
            ]
          }
        }
      ],
      "fields": [
        {
          "name": "src",
          "type": "String",
          "annotations": [{ "name": "JSFFaceletAttribute", "params": { "required": true } }]
        }
      ]
    },
    {
      "name": "org.example.tags.Functions",
      "methods": [
        {
          "name": "join",
          "returnType": "String",
          "parameters": [
            { "name": "items", "type": { "name": "String", "dimensions": 1 } },
            { "name": "separator", "type": "String" }
          ],
          "tags": [{ "name": "JSFFaceletFunction", "params": { "name": "ex:join" } }],
          "comment": "Joins items with a separator."
        }
      ]
    },
    {
      "name": "org.example.tags.VerbatimTag",
      "tags": [
        {
          "name": "JSFJspTag",
          "params": {
            "name": "ex:verbatim",
            "tagHandler": "org.example.taglib.VerbatimTagHandler",
            "desc": "Renders its body verbatim"
          }
        }
      ],
      "methods": [
        {
          "name": "setEscape",
          "parameters": [{ "name": "escape", "type": "boolean" }],
          "tags": [{ "name": "JSFJspAttribute", "params": { "rtexprvalue": "false" } }]
        }
      ]
    }
  ]
}"#;

/// A converter of a dependency module, saved as flattened metadata
pub const API_CONVERTERS: &str = r#"{
  "classes": [
    {
      "name": "org.example.api.ColorConverter",
      "tags": [
        {
          "name": "JSFConverter",
          "params": { "id": "api.Color", "tagClass": "org.example.api.taglib.ConvertColorTag" }
        }
      ],
      "methods": [
        {
          "name": "setFormat",
          "parameters": [{ "name": "format", "type": "String" }],
          "tags": [{ "name": "JSFProperty" }]
        }
      ]
    }
  ]
}"#;
