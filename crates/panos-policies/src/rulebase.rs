//! Rule containers and the operational state readers reached through them.
//!
//! A [`Rulebase`] owns rules of the three kinds. Hit count refreshes and
//! audit comment operations go through the rulebase because the device
//! scopes both by container and by rule kind.

use std::collections::BTreeMap;

use panos_schema::PanOsVersion;
use panos_xml::Element;
use tracing::debug;

use crate::opstate::{AuditCommentLog, HitCount, LogDirection};
use crate::rules::{Rule, RuleKind};
use crate::session::XapiSession;
use crate::PolicyError;

/// Hit count data exists since PAN-OS 8.1.
const HIT_COUNT_MIN: PanOsVersion = PanOsVersion::new(8, 1, 0);
/// Audit comments exist since PAN-OS 9.0.
const AUDIT_COMMENT_MIN: PanOsVersion = PanOsVersion::new(9, 0, 0);
/// Where rule entries sit in a rule-hit-count response.
const HIT_COUNT_ENTRIES: &str = "result/rule-hit-count/vsys/entry/rule-base/entry/rules/entry";
/// Vsys assumed when the session does not carry one.
const DEFAULT_VSYS: &str = "vsys1";

/// Which container a set of rules lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RulebaseKind {
    /// The firewall's local rulebase.
    Rulebase,
    /// Panorama rules evaluated before the local rulebase.
    PreRulebase,
    /// Panorama rules evaluated after the local rulebase.
    PostRulebase,
}

impl RulebaseKind {
    /// Path segment of this container in the configuration tree.
    pub fn path_segment(self) -> &'static str {
        match self {
            RulebaseKind::Rulebase => "rulebase",
            RulebaseKind::PreRulebase => "pre-rulebase",
            RulebaseKind::PostRulebase => "post-rulebase",
        }
    }
}

/// Which rules a hit count refresh asks the device about.
#[derive(Debug, Clone, Copy)]
pub enum HitCountSelection<'a> {
    /// The attached rules whose kind matches the query.
    Attached,
    /// Exactly these rule names, attached here or not.
    Named(&'a [&'a str]),
    /// Every rule the device knows, via `<all/>`.
    All,
}

/// An ordered collection of rules of mixed kinds.
#[derive(Debug, Clone)]
pub struct Rulebase {
    kind: RulebaseKind,
    rules: Vec<Rule>,
}

impl Default for Rulebase {
    fn default() -> Self {
        Self::new(RulebaseKind::Rulebase)
    }
}

impl Rulebase {
    pub fn new(kind: RulebaseKind) -> Self {
        Self {
            kind,
            rules: Vec::new(),
        }
    }

    pub fn kind(&self) -> RulebaseKind {
        self.kind
    }

    pub fn push(&mut self, rule: Rule) {
        self.rules.push(rule);
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn rule(&self, name: &str) -> Option<&Rule> {
        self.rules.iter().find(|rule| rule.name() == name)
    }

    pub fn rule_mut(&mut self, name: &str) -> Option<&mut Rule> {
        self.rules.iter_mut().find(|rule| rule.name() == name)
    }

    /// Detach and return the named rule.
    pub fn remove(&mut self, name: &str) -> Option<Rule> {
        let idx = self.rules.iter().position(|rule| rule.name() == name)?;
        Some(self.rules.remove(idx))
    }

    /// Fetch hit count data for rules of one kind.
    ///
    /// Requires PAN-OS 8.1+. Response entries matching an attached rule of
    /// that kind refresh the rule's own snapshot in place; every entry,
    /// attached or not, appears in the returned map. An empty selection
    /// returns an empty map without touching the device.
    pub fn refresh_hit_counts(
        &mut self,
        session: &dyn XapiSession,
        kind: RuleKind,
        selection: HitCountSelection<'_>,
    ) -> Result<BTreeMap<String, HitCount>, PolicyError> {
        require(session, HIT_COUNT_MIN)?;

        let requested: Option<Vec<String>> = match selection {
            HitCountSelection::All => None,
            HitCountSelection::Named(names) => {
                Some(names.iter().map(|name| name.to_string()).collect())
            }
            HitCountSelection::Attached => Some(
                self.rules
                    .iter()
                    .filter(|rule| rule.kind() == kind)
                    .map(|rule| rule.name().to_string())
                    .collect(),
            ),
        };
        if let Some(names) = &requested {
            if names.is_empty() {
                debug!(style = kind.hit_count_style(), "no rules selected, skipping query");
                return Ok(BTreeMap::new());
            }
        }

        let vsys = session.vsys().unwrap_or(DEFAULT_VSYS);
        let cmd = hit_count_cmd(vsys, kind.hit_count_style(), requested.as_deref());
        let response = session.op(&cmd)?;

        let mut out = BTreeMap::new();
        for elm in response.find_all(HIT_COUNT_ENTRIES) {
            let Some(name) = elm.attr("name") else {
                continue;
            };
            match self.rule_mut_of_kind(kind, name) {
                Some(rule) => {
                    rule.opstate.hit_count.refresh_from(elm);
                    out.insert(name.to_string(), rule.opstate.hit_count.clone());
                }
                None => {
                    out.insert(name.to_string(), HitCount::from_entry(name, elm));
                }
            }
        }
        debug!(
            style = kind.hit_count_style(),
            rules = out.len(),
            "refreshed hit counts"
        );
        Ok(out)
    }

    /// Refresh one attached rule's hit count snapshot and return it.
    pub fn refresh_hit_count(
        &mut self,
        session: &dyn XapiSession,
        name: &str,
    ) -> Result<HitCount, PolicyError> {
        let kind = match self.rule(name) {
            Some(rule) => rule.kind(),
            None => return Err(PolicyError::RuleNotFound(name.to_string())),
        };
        self.refresh_hit_counts(session, kind, HitCountSelection::Named(&[name]))?;
        match self.rule(name) {
            Some(rule) => Ok(rule.opstate.hit_count.clone()),
            None => Err(PolicyError::RuleNotFound(name.to_string())),
        }
    }

    /// Audit comment operations for the named attached rule.
    pub fn audit_comment(&self, name: &str) -> Result<AuditComment<'_>, PolicyError> {
        let rule = self
            .rule(name)
            .ok_or_else(|| PolicyError::RuleNotFound(name.to_string()))?;
        Ok(AuditComment {
            rulebase_kind: self.kind,
            rule,
        })
    }

    fn rule_mut_of_kind(&mut self, kind: RuleKind, name: &str) -> Option<&mut Rule> {
        self.rules
            .iter_mut()
            .find(|rule| rule.kind() == kind && rule.name() == name)
    }
}

/// Audit comment operations for one attached rule, borrowed from its
/// rulebase so requests can name the rule, its kind, and its container.
///
/// All operations require PAN-OS 9.0+.
#[derive(Debug, Clone, Copy)]
pub struct AuditComment<'a> {
    rulebase_kind: RulebaseKind,
    rule: &'a Rule,
}

impl AuditComment<'_> {
    /// A chunk of historical audit comment log entries for this rule.
    ///
    /// `count` caps the number of entries (the device accepts up to 5000)
    /// and `skip` offsets into the result for batched retrieval.
    pub fn history(
        &self,
        session: &dyn XapiSession,
        count: usize,
        direction: LogDirection,
        skip: Option<usize>,
    ) -> Result<Vec<AuditCommentLog>, PolicyError> {
        require(session, AUDIT_COMMENT_MIN)?;
        let vsys = session.vsys().unwrap_or(DEFAULT_VSYS);
        let filter = self.log_filter(vsys);

        let mut extra_qs = vec![
            ("dir".to_string(), direction.as_str().to_string()),
            ("uniq".to_string(), "yes".to_string()),
        ];
        if let Some(skip) = skip {
            extra_qs.push(("skip".to_string(), skip.to_string()));
        }

        let response = session.log("config", count, &filter, &extra_qs)?;
        let logs: Vec<AuditCommentLog> = response
            .find_all("result/log/logs/entry")
            .into_iter()
            .map(AuditCommentLog::from_entry)
            .collect();
        debug!(rule = self.rule.name(), entries = logs.len(), "fetched audit history");
        Ok(logs)
    }

    /// The rule's current audit comment, if it has one.
    pub fn current(&self, session: &dyn XapiSession) -> Result<Option<String>, PolicyError> {
        require(session, AUDIT_COMMENT_MIN)?;
        let vsys = session.vsys().unwrap_or(DEFAULT_VSYS);
        let cmd = Element::new("show").with_child(
            Element::new("config").with_child(
                Element::new("list").with_child(
                    Element::new("audit-comments")
                        .with_child(Element::new("xpath").with_text(self.xpath(vsys))),
                ),
            ),
        );
        let response = session.op(&cmd)?;
        Ok(response.find_text("result/entry/comment").map(str::to_string))
    }

    /// Set the audit comment recorded with the rule's next commit.
    pub fn update(&self, session: &dyn XapiSession, comment: &str) -> Result<(), PolicyError> {
        require(session, AUDIT_COMMENT_MIN)?;
        let vsys = session.vsys().unwrap_or(DEFAULT_VSYS);
        let cmd = Element::new("set").with_child(
            Element::new("audit-comment")
                .with_child(Element::new("xpath").with_text(self.xpath(vsys)))
                .with_child(Element::new("comment").with_text(comment)),
        );
        session.op(&cmd)?;
        Ok(())
    }

    /// Configuration log filter narrowing entries to this rule. The quoting
    /// mirrors how the log database stores config paths.
    fn log_filter(&self, vsys: &str) -> String {
        format!(
            "(subtype eq audit-comment) and (path contains '\\'{}\\'') and \
             (path contains '{}') and (path contains {}) and (path contains '\\'{}\\'')",
            self.rule.name(),
            self.rule.kind().config_segment(),
            self.rulebase_kind.path_segment(),
            vsys,
        )
    }

    /// The rule's configuration xpath on the device.
    fn xpath(&self, vsys: &str) -> String {
        format!(
            "/config/devices/entry[@name='localhost.localdomain']/vsys/entry[@name='{}']/{}/{}/entry[@name='{}']",
            vsys,
            self.rulebase_kind.path_segment(),
            self.rule.kind().xpath_suffix(),
            self.rule.name(),
        )
    }
}

fn require(session: &dyn XapiSession, needed: PanOsVersion) -> Result<(), PolicyError> {
    let have = session.panos_version();
    if have < needed {
        return Err(PolicyError::Unsupported { needed, have });
    }
    Ok(())
}

fn hit_count_cmd(vsys: &str, style: &str, names: Option<&[String]>) -> Element {
    let mut rules = Element::new("rules");
    match names {
        None => rules.push_child(Element::new("all")),
        Some(names) => {
            let mut list = Element::new("list");
            for name in names {
                list.push_child(Element::new("member").with_text(name));
            }
            rules.push_child(list);
        }
    }
    Element::new("show").with_child(
        Element::new("rule-hit-count").with_child(
            Element::new("vsys").with_child(
                Element::new("vsys-name").with_child(
                    Element::new("entry").with_attr("name", vsys).with_child(
                        Element::new("rule-base").with_child(
                            Element::new("entry")
                                .with_attr("name", style)
                                .with_child(rules),
                        ),
                    ),
                ),
            ),
        ),
    )
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::collections::VecDeque;

    use panos_schema::PanOsVersion;
    use panos_xml::Element;
    use pretty_assertions::assert_eq;
    use time::macros::datetime;

    use crate::opstate::{LogDirection, LogTimestamp};
    use crate::rules::{Rule, RuleKind};
    use crate::session::{XapiError, XapiSession};
    use crate::PolicyError;

    use super::{HitCountSelection, Rulebase, RulebaseKind};

    const V8_0: PanOsVersion = PanOsVersion::new(8, 0, 0);
    const V8_1: PanOsVersion = PanOsVersion::new(8, 1, 0);
    const V10: PanOsVersion = PanOsVersion::new(10, 0, 0);

    /// Scripted session: records every request, replays queued responses.
    struct MockSession {
        version: PanOsVersion,
        vsys: Option<String>,
        ops: RefCell<Vec<String>>,
        logs: RefCell<Vec<(String, usize, String, Vec<(String, String)>)>>,
        op_responses: RefCell<VecDeque<Element>>,
        log_responses: RefCell<VecDeque<Element>>,
    }

    impl MockSession {
        fn new(version: PanOsVersion) -> Self {
            Self {
                version,
                vsys: None,
                ops: RefCell::new(Vec::new()),
                logs: RefCell::new(Vec::new()),
                op_responses: RefCell::new(VecDeque::new()),
                log_responses: RefCell::new(VecDeque::new()),
            }
        }

        fn with_vsys(mut self, vsys: &str) -> Self {
            self.vsys = Some(vsys.to_string());
            self
        }

        fn queue_op(&self, xml: &str) {
            self.op_responses
                .borrow_mut()
                .push_back(panos_xml::parse(xml).expect("queued response"));
        }

        fn queue_log(&self, xml: &str) {
            self.log_responses
                .borrow_mut()
                .push_back(panos_xml::parse(xml).expect("queued response"));
        }

        fn ops(&self) -> Vec<String> {
            self.ops.borrow().clone()
        }

        fn logs(&self) -> Vec<(String, usize, String, Vec<(String, String)>)> {
            self.logs.borrow().clone()
        }
    }

    impl XapiSession for MockSession {
        fn panos_version(&self) -> PanOsVersion {
            self.version
        }

        fn vsys(&self) -> Option<&str> {
            self.vsys.as_deref()
        }

        fn op(&self, cmd: &Element) -> Result<Element, XapiError> {
            self.ops
                .borrow_mut()
                .push(panos_xml::write(cmd).expect("serialize command"));
            Ok(self
                .op_responses
                .borrow_mut()
                .pop_front()
                .unwrap_or_else(|| Element::new("response")))
        }

        fn log(
            &self,
            log_type: &str,
            count: usize,
            filter: &str,
            extra_qs: &[(String, String)],
        ) -> Result<Element, XapiError> {
            self.logs.borrow_mut().push((
                log_type.to_string(),
                count,
                filter.to_string(),
                extra_qs.to_vec(),
            ));
            Ok(self
                .log_responses
                .borrow_mut()
                .pop_front()
                .unwrap_or_else(|| Element::new("response")))
        }
    }

    fn security_rulebase(names: &[&str]) -> Rulebase {
        let mut rb = Rulebase::default();
        for name in names {
            rb.push(Rule::security(*name));
        }
        rb
    }

    #[test]
    fn hit_counts_need_eight_one() {
        let session = MockSession::new(V8_0);
        let mut rb = security_rulebase(&["r1"]);

        let err = rb
            .refresh_hit_counts(&session, RuleKind::Security, HitCountSelection::All)
            .expect_err("too old");
        assert!(matches!(err, PolicyError::Unsupported { .. }));
        assert_eq!(err.to_string(), "requires PAN-OS 8.1.0+, device is 8.0.0");
        assert!(session.ops().is_empty(), "no request may be issued");
    }

    #[test]
    fn attached_selection_without_matching_rules_skips_request() {
        let session = MockSession::new(V10);
        let mut rb = security_rulebase(&[]);
        rb.push(Rule::nat("n1"));

        let counts = rb
            .refresh_hit_counts(&session, RuleKind::Security, HitCountSelection::Attached)
            .expect("empty refresh");
        assert!(counts.is_empty());
        assert!(session.ops().is_empty());
    }

    #[test]
    fn all_selection_builds_documented_command() {
        let session = MockSession::new(V8_1);
        let mut rb = security_rulebase(&[]);
        rb.refresh_hit_counts(&session, RuleKind::Security, HitCountSelection::All)
            .expect("refresh");

        let expected = "\
<show>
  <rule-hit-count>
    <vsys>
      <vsys-name>
        <entry name=\"vsys1\">
          <rule-base>
            <entry name=\"security\">
              <rules>
                <all/>
              </rules>
            </entry>
          </rule-base>
        </entry>
      </vsys-name>
    </vsys>
  </rule-hit-count>
</show>";
        assert_eq!(session.ops(), vec![expected.to_string()]);
    }

    #[test]
    fn attached_selection_lists_only_matching_kind() {
        let session = MockSession::new(V10).with_vsys("vsys3");
        let mut rb = security_rulebase(&["r1", "r2"]);
        rb.push(Rule::nat("n1"));

        rb.refresh_hit_counts(&session, RuleKind::Security, HitCountSelection::Attached)
            .expect("refresh");

        let ops = session.ops();
        assert_eq!(ops.len(), 1);
        let cmd = panos_xml::parse(&ops[0]).expect("recorded command");
        assert_eq!(
            cmd.find("rule-hit-count/vsys/vsys-name/entry")
                .and_then(|e| e.attr("name")),
            Some("vsys3")
        );
        let members: Vec<_> = cmd
            .find_all("rule-hit-count/vsys/vsys-name/entry/rule-base/entry/rules/list/member")
            .into_iter()
            .filter_map(Element::text)
            .collect();
        assert_eq!(members, ["r1", "r2"]);
    }

    #[test]
    fn named_selection_updates_attached_and_reports_strangers() {
        let session = MockSession::new(V10);
        session.queue_op(
            "<response status=\"success\"><result><rule-hit-count><vsys>\
             <entry name=\"vsys1\"><rule-base><entry name=\"security\"><rules>\
             <entry name=\"r1\"><hit-count>5</hit-count><latest>yes</latest></entry>\
             <entry name=\"ghost\"><hit-count>2</hit-count></entry>\
             </rules></entry></rule-base></entry></vsys></rule-hit-count></result></response>",
        );
        let mut rb = security_rulebase(&["r1"]);

        let counts = rb
            .refresh_hit_counts(
                &session,
                RuleKind::Security,
                HitCountSelection::Named(&["r1", "ghost"]),
            )
            .expect("refresh");

        assert_eq!(counts.len(), 2);
        assert_eq!(counts["r1"].hit_count, Some(5));
        assert_eq!(counts["ghost"].hit_count, Some(2));

        // The attached rule's snapshot was refreshed in place.
        let rule = rb.rule("r1").expect("attached rule");
        assert_eq!(rule.opstate.hit_count.hit_count, Some(5));
        assert_eq!(rule.opstate.hit_count.latest.as_deref(), Some("yes"));

        // The request listed exactly the names given, in order.
        let cmd = panos_xml::parse(&session.ops()[0]).expect("recorded command");
        let members: Vec<_> = cmd
            .find_all("rule-hit-count/vsys/vsys-name/entry/rule-base/entry/rules/list/member")
            .into_iter()
            .filter_map(Element::text)
            .collect();
        assert_eq!(members, ["r1", "ghost"]);
    }

    #[test]
    fn named_selection_ignores_other_kinds_on_update() {
        let session = MockSession::new(V10);
        session.queue_op(
            "<response><result><rule-hit-count><vsys><entry name=\"vsys1\">\
             <rule-base><entry name=\"nat\"><rules>\
             <entry name=\"shared-name\"><hit-count>9</hit-count></entry>\
             </rules></entry></rule-base></entry></vsys></rule-hit-count></result></response>",
        );
        let mut rb = security_rulebase(&["shared-name"]);

        let counts = rb
            .refresh_hit_counts(
                &session,
                RuleKind::Nat,
                HitCountSelection::Named(&["shared-name"]),
            )
            .expect("refresh");

        // A security rule by the same name must not swallow NAT data.
        assert_eq!(counts["shared-name"].hit_count, Some(9));
        let rule = rb.rule("shared-name").expect("attached rule");
        assert_eq!(rule.opstate.hit_count.hit_count, None);
    }

    #[test]
    fn single_rule_refresh_goes_through_named_selection() {
        let session = MockSession::new(V10);
        session.queue_op(
            "<response><result><rule-hit-count><vsys><entry name=\"vsys1\">\
             <rule-base><entry name=\"security\"><rules>\
             <entry name=\"r1\"><hit-count>12</hit-count></entry>\
             </rules></entry></rule-base></entry></vsys></rule-hit-count></result></response>",
        );
        let mut rb = security_rulebase(&["r1"]);

        let hc = rb.refresh_hit_count(&session, "r1").expect("refresh");
        assert_eq!(hc.hit_count, Some(12));
        assert_eq!(rb.rule("r1").expect("rule").opstate.hit_count.hit_count, Some(12));

        let err = rb.refresh_hit_count(&session, "nope").expect_err("unknown");
        assert!(matches!(err, PolicyError::RuleNotFound(_)));
        assert_eq!(session.ops().len(), 1, "unknown rule may not hit the device");
    }

    #[test]
    fn audit_comment_requires_attachment() {
        let rb = security_rulebase(&["r1"]);
        assert!(rb.audit_comment("r1").is_ok());
        let err = rb.audit_comment("r2").expect_err("unattached");
        assert!(matches!(err, PolicyError::RuleNotFound(ref name) if name == "r2"));
    }

    #[test]
    fn audit_operations_need_nine_oh() {
        let session = MockSession::new(V8_1);
        let rb = security_rulebase(&["r1"]);
        let audit = rb.audit_comment("r1").expect("view");

        assert!(matches!(
            audit.history(&session, 100, LogDirection::Backward, None),
            Err(PolicyError::Unsupported { .. })
        ));
        assert!(matches!(
            audit.current(&session),
            Err(PolicyError::Unsupported { .. })
        ));
        assert!(matches!(
            audit.update(&session, "x"),
            Err(PolicyError::Unsupported { .. })
        ));
        assert!(session.ops().is_empty());
        assert!(session.logs().is_empty());
    }

    #[test]
    fn history_sends_documented_filter_and_query() {
        let session = MockSession::new(V10);
        let rb = security_rulebase(&["r1"]);
        let audit = rb.audit_comment("r1").expect("view");

        audit
            .history(&session, 100, LogDirection::Backward, Some(200))
            .expect("history");

        let logs = session.logs();
        assert_eq!(logs.len(), 1);
        let (log_type, count, filter, extra_qs) = &logs[0];
        assert_eq!(log_type, "config");
        assert_eq!(*count, 100);
        assert_eq!(
            filter,
            "(subtype eq audit-comment) and (path contains '\\'r1\\'') and \
             (path contains 'security') and (path contains rulebase) and \
             (path contains '\\'vsys1\\'')"
        );
        assert_eq!(
            extra_qs,
            &vec![
                ("dir".to_string(), "backward".to_string()),
                ("uniq".to_string(), "yes".to_string()),
                ("skip".to_string(), "200".to_string()),
            ]
        );
    }

    #[test]
    fn history_filter_tracks_rulebase_kind_and_vsys() {
        let session = MockSession::new(V10).with_vsys("vsys7");
        let mut rb = Rulebase::new(RulebaseKind::PreRulebase);
        rb.push(Rule::nat("n1"));
        let audit = rb.audit_comment("n1").expect("view");

        audit
            .history(&session, 50, LogDirection::Forward, None)
            .expect("history");

        let logs = session.logs();
        let (_, _, filter, extra_qs) = &logs[0];
        assert!(filter.contains("(path contains 'nat')"));
        assert!(filter.contains("(path contains pre-rulebase)"));
        assert!(filter.contains("(path contains '\\'vsys7\\'')"));
        assert_eq!(extra_qs[0], ("dir".to_string(), "forward".to_string()));
        assert_eq!(extra_qs.len(), 2, "no skip parameter unless asked");
    }

    #[test]
    fn history_parses_log_entries() {
        let session = MockSession::new(V10);
        session.queue_log(
            "<response status=\"success\"><result><log><logs count=\"2\">\
             <entry logid=\"7\"><admin>jdoe</admin><comment>allow outbound web</comment>\
             <config_ver>3</config_ver><time_generated>2020/09/02 17:57:34</time_generated></entry>\
             <entry logid=\"6\"><admin>asmith</admin><comment>initial</comment>\
             <config_ver>2</config_ver><time_generated>2020/08/30 09:12:01</time_generated></entry>\
             </logs></log></result></response>",
        );
        let rb = security_rulebase(&["r1"]);
        let audit = rb.audit_comment("r1").expect("view");

        let logs = audit
            .history(&session, 100, LogDirection::Backward, None)
            .expect("history");
        assert_eq!(logs.len(), 2);
        assert_eq!(logs[0].admin.as_deref(), Some("jdoe"));
        assert_eq!(logs[0].config_version, Some(3));
        assert_eq!(
            logs[0].time,
            Some(LogTimestamp::At(datetime!(2020-09-02 17:57:34)))
        );
        assert_eq!(logs[1].comment.as_deref(), Some("initial"));
    }

    #[test]
    fn current_comment_command_and_empty_answer() {
        let session = MockSession::new(V10);
        session.queue_op("<response status=\"success\"><result/></response>");
        let rb = security_rulebase(&["r1"]);
        let audit = rb.audit_comment("r1").expect("view");

        let comment = audit.current(&session).expect("current");
        assert_eq!(comment, None);

        let expected = "\
<show>
  <config>
    <list>
      <audit-comments>
        <xpath>/config/devices/entry[@name='localhost.localdomain']/vsys/entry[@name='vsys1']/rulebase/security/rules/entry[@name='r1']</xpath>
      </audit-comments>
    </list>
  </config>
</show>";
        assert_eq!(session.ops(), vec![expected.to_string()]);
    }

    #[test]
    fn current_comment_reads_result_entry() {
        let session = MockSession::new(V10);
        session.queue_op(
            "<response status=\"success\"><result><entry>\
             <comment>needs review</comment></entry></result></response>",
        );
        let rb = security_rulebase(&["r1"]);
        let audit = rb.audit_comment("r1").expect("view");

        assert_eq!(
            audit.current(&session).expect("current"),
            Some("needs review".to_string())
        );
    }

    #[test]
    fn update_sends_set_command() {
        let session = MockSession::new(V10);
        let rb = security_rulebase(&["r1"]);
        let audit = rb.audit_comment("r1").expect("view");

        audit.update(&session, "reviewed 2024-06").expect("update");

        let expected = "\
<set>
  <audit-comment>
    <xpath>/config/devices/entry[@name='localhost.localdomain']/vsys/entry[@name='vsys1']/rulebase/security/rules/entry[@name='r1']</xpath>
    <comment>reviewed 2024-06</comment>
  </audit-comment>
</set>";
        assert_eq!(session.ops(), vec![expected.to_string()]);
    }

    #[test]
    fn remove_detaches_rule() {
        let mut rb = security_rulebase(&["r1", "r2"]);
        let taken = rb.remove("r1").expect("detached");
        assert_eq!(taken.name(), "r1");
        assert!(rb.rule("r1").is_none());
        assert!(rb.rule("r2").is_some());
    }
}
