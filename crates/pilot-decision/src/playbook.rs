use pilot_types::DecisionKind;

/// Presentation text attached to a decision.
#[derive(Debug)]
pub struct Playbook {
    /// Rationale template; `{score}` and `{lift}` are substituted.
    pub rationale: &'static str,
    pub next_actions: &'static [&'static str],
}

impl Playbook {
    pub fn render_rationale(&self, success_score: f64, primary_lift: f64) -> String {
        self.rationale
            .replace("{score}", &format!("{success_score:.2}"))
            .replace("{lift}", &format!("{:.1}%", primary_lift * 100.0))
    }

    pub fn next_actions(&self) -> Vec<String> {
        self.next_actions.iter().map(|a| a.to_string()).collect()
    }
}

const SCALE: Playbook = Playbook {
    rationale: "Success score {score} with primary lift {lift} exceeds the scale threshold; \
                the hypothesis is validated with material upside.",
    next_actions: &[
        "Prepare a scale-up plan with resource requirements",
        "Secure budget for the next horizon",
        "Hand over operations to the owning business unit",
        "Document learnings for the portfolio",
    ],
};

const PERSEVERE: Playbook = Playbook {
    rationale: "Success score {score} meets the success bar but primary lift {lift} is below \
                the scale threshold; continue on the current course.",
    next_actions: &[
        "Continue execution against the current plan",
        "Extend the measurement window to confirm lift",
        "Optimize the highest-leverage metric",
    ],
};

const ITERATE: Playbook = Playbook {
    rationale: "Success score {score} shows partial validation; adjust the approach while \
                keeping the core hypothesis.",
    next_actions: &[
        "Identify the metrics that missed target",
        "Design experiments addressing the gaps",
        "Re-run validation after changes ship",
    ],
};

const PIVOT: Playbook = Playbook {
    rationale: "Success score {score} indicates the hypothesis is largely unsupported; change \
                direction using what has been learned.",
    next_actions: &[
        "Run a retrospective on invalidated assumptions",
        "Formulate an alternative hypothesis",
        "Re-score the pivoted initiative before funding",
    ],
};

const TERMINATE: Playbook = Playbook {
    rationale: "Success score {score} is below the minimum bar; stop the initiative and \
                release its resources.",
    next_actions: &[
        "Wind down active work",
        "Release allocated resources to the portfolio",
        "Publish a post-mortem with learnings",
    ],
};

pub fn playbook(kind: DecisionKind) -> &'static Playbook {
    match kind {
        DecisionKind::Scale => &SCALE,
        DecisionKind::Persevere => &PERSEVERE,
        DecisionKind::Iterate => &ITERATE,
        DecisionKind::Pivot => &PIVOT,
        DecisionKind::Terminate => &TERMINATE,
    }
}
