use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Value, json};

use crate::rules::kinds::{
    ConfigFile, DependencyRule, ImportRelocationRule, ImportRemovalRule, JsonCheck, JsonPropertyRule,
    ScssImportRule, SourceTextRule,
};
use crate::rules::{ResolutionType, Rule, Severity};

const VERSION: &str = "1.16.0";

static LEGACY_PAGE_CONTEXT: Lazy<Regex> = Lazy::new(|| Regex::new(r"\.legacyPageContext\b").unwrap());

const LEGACY_FABRIC_SCSS: &str = "~office-ui-fabric-react/dist/sass/References.scss";
const FLUENT_SCSS: &str = "~@fluentui/react/dist/sass/References.scss";

/// Bindings re-exported unchanged by `@fluentui/react`.
const FLUENT_BINDINGS: &[&str] = &[
    "ChoiceGroup",
    "Checkbox",
    "DefaultButton",
    "DetailsList",
    "Dialog",
    "Dropdown",
    "IconButton",
    "Label",
    "Link",
    "MessageBar",
    "MessageBarType",
    "Panel",
    "PrimaryButton",
    "Spinner",
    "Stack",
    "TextField",
    "Toggle",
];

pub fn rules() -> Vec<Box<dyn Rule>> {
    let mut rules: Vec<Box<dyn Rule>> = vec![
        Box::new(DependencyRule::upgrade("FN001001", "@microsoft/sp-core-library", VERSION, false)),
        Box::new(DependencyRule::upgrade("FN001002", "@microsoft/sp-lodash-subset", VERSION, false)),
        Box::new(DependencyRule::upgrade("FN001003", "@microsoft/sp-office-ui-fabric-core", VERSION, false)),
        Box::new(DependencyRule::upgrade("FN001004", "@microsoft/sp-webpart-base", VERSION, false).optional()),
        Box::new(DependencyRule::upgrade("FN001005", "@microsoft/sp-property-pane", VERSION, false).optional()),
        Box::new(DependencyRule::remove("FN001033", "office-ui-fabric-react", false).supersedes(&["FN001022"])),
        Box::new(
            DependencyRule::upgrade("FN001034", "@fluentui/react", "7.199.1", false)
                .only_if_installed("office-ui-fabric-react"),
        ),
        Box::new(DependencyRule::upgrade("FN002001", "@microsoft/sp-build-web", VERSION, true)),
        Box::new(DependencyRule::upgrade("FN002002", "@microsoft/sp-module-interfaces", VERSION, true)),
        Box::new(DependencyRule::upgrade("FN002022", "@microsoft/eslint-plugin-spfx", VERSION, true)),
        Box::new(DependencyRule::upgrade("FN002023", "@microsoft/eslint-config-spfx", VERSION, true)),
        Box::new(JsonPropertyRule::new(
            "FN010001",
            ConfigFile::YoRc,
            "/@microsoft~1generator-sharepoint/version",
            JsonCheck::Equals(Value::from(VERSION)),
        )),
        Box::new(
            ImportRelocationRule::new("FN016010", "office-ui-fabric-react", "@fluentui/react", FLUENT_BINDINGS)
                .description("Import Fluent UI components from @fluentui/react"),
        ),
        Box::new(
            ImportRemovalRule::new("FN016011", "@microsoft/sp-lodash-subset", &["escape"])
                .description("escape is no longer exported by @microsoft/sp-lodash-subset, use @microsoft/sp-core-library's Text.escape"),
        ),
    ];

    rules.push(Box::new(
        SourceTextRule::new(
            "FN016012",
            "legacyPageContext",
            LEGACY_PAGE_CONTEXT.clone(),
            ResolutionType::Text,
            "Read the value from this.context.pageContext instead of legacyPageContext",
        )
        .description("legacyPageContext is deprecated")
        .severity(Severity::Optional),
    ));
    rules.push(Box::new(ScssImportRule::new("FN022001", LEGACY_FABRIC_SCSS, false)));
    rules.push(Box::new(ScssImportRule::new("FN022002", FLUENT_SCSS, true)));
    rules.push(Box::new(
        JsonPropertyRule::new(
            "FN021003",
            ConfigFile::PackageJson,
            "/engines/node",
            JsonCheck::Equals(json!(">=12.13.0 <13.0.0 || >=14.15.0 <15.0.0 || >=16.13.0 <17.0.0")),
        )
        .severity(Severity::Recommended),
    ));
    rules.push(Box::new(
        JsonPropertyRule::new(
            "FN007003",
            ConfigFile::Serve,
            "/initialPage",
            JsonCheck::Equals(json!("https://{tenantDomain}/_layouts/workbench.aspx")),
        )
        .severity(Severity::Optional)
        .description("Open the hosted workbench of the tenant set in SPFX_SERVE_TENANT_DOMAIN"),
    ));

    rules
}
