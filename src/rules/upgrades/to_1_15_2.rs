use serde_json::{Value, json};

use crate::rules::kinds::{ConfigFile, DependencyRule, JsonCheck, JsonPropertyRule, ManifestPropertyRule};
use crate::rules::{Rule, Severity};

const VERSION: &str = "1.15.2";

pub fn rules() -> Vec<Box<dyn Rule>> {
    vec![
        Box::new(DependencyRule::upgrade("FN001001", "@microsoft/sp-core-library", VERSION, false)),
        Box::new(DependencyRule::upgrade("FN001002", "@microsoft/sp-lodash-subset", VERSION, false)),
        Box::new(DependencyRule::upgrade("FN001003", "@microsoft/sp-office-ui-fabric-core", VERSION, false)),
        Box::new(DependencyRule::upgrade("FN001004", "@microsoft/sp-webpart-base", VERSION, false).optional()),
        Box::new(DependencyRule::upgrade("FN001005", "@microsoft/sp-property-pane", VERSION, false).optional()),
        Box::new(DependencyRule::upgrade("FN002001", "@microsoft/sp-build-web", VERSION, true)),
        Box::new(DependencyRule::upgrade("FN002002", "@microsoft/sp-module-interfaces", VERSION, true)),
        Box::new(DependencyRule::upgrade("FN002022", "@microsoft/eslint-plugin-spfx", VERSION, true)),
        Box::new(DependencyRule::upgrade("FN002023", "@microsoft/eslint-config-spfx", VERSION, true)),
        Box::new(JsonPropertyRule::new(
            "FN006005",
            ConfigFile::PackageSolution,
            "/solution/developer",
            JsonCheck::Present(json!({
                "name": "",
                "websiteUrl": "",
                "privacyUrl": "",
                "termsOfUseUrl": "",
                "mpnId": "Undefined-1.15.2"
            })),
        )
        .severity(Severity::Optional)),
        Box::new(JsonPropertyRule::new(
            "FN010001",
            ConfigFile::YoRc,
            "/@microsoft~1generator-sharepoint/version",
            JsonCheck::Equals(Value::from(VERSION)),
        )),
        Box::new(
            ManifestPropertyRule::new("FN011011", Some("WebPart"), "/supportedHosts", JsonCheck::Present(json!(["SharePointWebPart"])))
                .description("Declare the hosts the web part can be used in"),
        ),
    ]
}
