use crate::project::Project;
use crate::rules::syntax::{
    call_arguments, enclosing_call, member_chain, member_receiver, node_position, property_accesses,
};
use crate::rules::{Finding, Occurrence, ResolutionType, Rule, RuleInfo, Severity};

/// `<object>.<method>(...)` must receive `argument` at `index`, e.g.
/// `msGraphClientFactory.getClient('3')`.
pub struct CallArgumentRule {
    info: RuleInfo,
    object: String,
    method: String,
    argument: String,
    index: usize,
}

impl CallArgumentRule {
    pub fn new(id: &str, object: &str, method: &str, index: usize, argument: &str) -> Self {
        let info = RuleInfo::new(id, format!("{}.{}", object, method))
            .description(format!("Pass {} to {}.{}", argument, object, method))
            .resolution(ResolutionType::Ts, format!("{}({})", method, argument))
            .severity(Severity::Required)
            .property("method", method)
            .property("argument", argument);
        Self {
            info,
            object: object.to_string(),
            method: method.to_string(),
            argument: argument.to_string(),
            index,
        }
    }

    pub fn description(mut self, description: &str) -> Self {
        self.info = self.info.description(description);
        self
    }
}

impl Rule for CallArgumentRule {
    fn info(&self) -> &RuleInfo {
        &self.info
    }

    fn visit(&self, project: &Project, _prior: &[Finding]) -> Vec<Finding> {
        let mut occurrences = Vec::new();

        for file in &project.source_files {
            let Some(nodes) = file.nodes() else {
                continue;
            };
            for access in property_accesses(file, &self.method) {
                let Some(call) = enclosing_call(nodes, access) else {
                    continue;
                };
                if member_receiver(file, nodes, access) != Some(self.object.as_str()) {
                    continue;
                }
                let callee: String = member_chain(file, nodes, access)
                    .chars()
                    .filter(|c| !c.is_whitespace())
                    .collect();

                let args: Vec<&str> = call_arguments(nodes, call)
                    .into_iter()
                    .map(|a| file.node_text(&nodes[a]))
                    .collect();
                if args.get(self.index).map(|a| a.trim()) == Some(self.argument.as_str()) {
                    continue;
                }

                let mut fixed = args;
                if fixed.len() > self.index {
                    fixed[self.index] = self.argument.as_str();
                } else {
                    // pad skipped positions so the argument lands at `index`
                    fixed.resize(self.index, "undefined");
                    fixed.push(self.argument.as_str());
                }

                occurrences.push(
                    Occurrence::new(
                        project.relative(file.path()),
                        format!("{}({})", callee, fixed.join(", ")),
                    )
                    .at(node_position(&nodes[call])),
                );
            }
        }

        self.info.finding(occurrences).into_iter().collect()
    }
}
