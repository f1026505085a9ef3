use serde_json::Value;

use crate::rules::kinds::{
    CallArgumentRule, ConfigFile, DependencyRule, FileExistsRule, IgnoreEntryRule, JsonCheck, JsonPropertyRule,
    LintConfigRule,
};
use crate::rules::{ResolutionType, Rule, Severity};

const VERSION: &str = "1.15.0";

const ESLINT_PATCH: &str = "require('@rushstack/eslint-config/patch/modern-module-resolution');";

const ESLINTRC: &str = r#"require('@rushstack/eslint-config/patch/modern-module-resolution');
module.exports = {
  extends: ['@microsoft/eslint-config-spfx/lib/profiles/react'],
  parserOptions: { tsconfigRootDir: __dirname }
};"#;

pub fn rules() -> Vec<Box<dyn Rule>> {
    vec![
        Box::new(DependencyRule::upgrade("FN001001", "@microsoft/sp-core-library", VERSION, false)),
        Box::new(DependencyRule::upgrade("FN001002", "@microsoft/sp-lodash-subset", VERSION, false)),
        Box::new(DependencyRule::upgrade("FN001003", "@microsoft/sp-office-ui-fabric-core", VERSION, false)),
        Box::new(DependencyRule::upgrade("FN001004", "@microsoft/sp-webpart-base", VERSION, false).optional()),
        Box::new(DependencyRule::upgrade("FN001005", "@microsoft/sp-property-pane", VERSION, false).optional()),
        Box::new(DependencyRule::upgrade("FN001022", "office-ui-fabric-react", "7.185.7", false).optional()),
        Box::new(DependencyRule::upgrade("FN002001", "@microsoft/sp-build-web", VERSION, true)),
        Box::new(DependencyRule::upgrade("FN002002", "@microsoft/sp-module-interfaces", VERSION, true)),
        Box::new(DependencyRule::upgrade("FN002022", "@microsoft/eslint-plugin-spfx", VERSION, true)),
        Box::new(DependencyRule::upgrade("FN002023", "@microsoft/eslint-config-spfx", VERSION, true)),
        Box::new(DependencyRule::upgrade("FN002024", "eslint", "8.7.0", true)),
        Box::new(DependencyRule::upgrade("FN002025", "@microsoft/rush-stack-compiler-4.5", "0.2.2", true)),
        Box::new(DependencyRule::remove("FN002026", "@microsoft/rush-stack-compiler-3.9", true)),
        Box::new(DependencyRule::remove("FN002027", "@microsoft/sp-tslint-rules", true)),
        Box::new(JsonPropertyRule::new(
            "FN010001",
            ConfigFile::YoRc,
            "/@microsoft~1generator-sharepoint/version",
            JsonCheck::Equals(Value::from(VERSION)),
        )),
        Box::new(JsonPropertyRule::new(
            "FN012017",
            ConfigFile::TsConfig,
            "/extends",
            JsonCheck::Equals(Value::from(
                "./node_modules/@microsoft/rush-stack-compiler-4.5/includes/tsconfig-web.json",
            )),
        )),
        Box::new(
            JsonPropertyRule::new("FN007002", ConfigFile::Serve, "/api", JsonCheck::Absent)
                .severity(Severity::Recommended)
                .description("Remove the local workbench api settings from config/serve.json"),
        ),
        Box::new(FileExistsRule::remove("FN015003", "tslint.json")),
        Box::new(FileExistsRule::add("FN015007", ".eslintrc.js", ResolutionType::Js, ESLINTRC)),
        Box::new(
            CallArgumentRule::new("FN016004", "msGraphClientFactory", "getClient", 0, "'3'")
                .description("Pass the Microsoft Graph client version '3' to getClient"),
        ),
        Box::new(IgnoreEntryRule::new("FN023002", ".heft", true)),
        Box::new(IgnoreEntryRule::npm("FN024001", ".heft", true).severity(Severity::Optional)),
        Box::new(
            LintConfigRule::requires("FN025001", ESLINT_PATCH)
                .description("Load the modern module resolution patch at the top of .eslintrc.js"),
        ),
    ]
}
