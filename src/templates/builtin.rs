//! Built-in category set.
//!
//! The ER&D category carries the full approved wording; the other functions
//! reuse the same three-variant structure with generic wording until their
//! own copy is approved. All four share one subject pattern.

use super::{Category, CategorySet, TemplateVariant};

const SUBJECT: &str = "{{function_label}} Data Collection - {{case_code}} ({{client_name}})";

const BODY_ERD_INITIAL: &str = r#"
<p>Hi {{case_manager_name}},</p>

<p>Hope you are doing well!</p>

<p>
I am the practice manager for Engineering and R&amp;D and I wanted to reach out
regarding your work with <strong>{{client_name}}</strong>
(<strong>{{case_code}}</strong>). From what we heard your case also included an
ER&amp;D component, and we would like your support with our effort to build
proprietary ER&amp;D benchmarking databases.
</p>

<p>
The benchmarking team (in cc) will follow up with specifics. They can address
any queries and will work with you to gather data for the benchmarking
database. If you do not have visibility into the requested information or
access to the client's ER&amp;D data, please let us know. Should there be any
concerns about sharing sensitive client data, our standard engagement terms
allow collecting and storing data for benchmarking purposes, and the
benchmarking team follows a double-blind process that disguises any client
data collected.
</p>

<p>Thanks in advance!</p>

<p>Best,<br/>Practice Management</p>
"#;

const BODY_ERD_FOLLOWUP: &str = r#"
<p>Hi {{case_manager_name}},</p>

<p>Hope you're doing well!</p>

<p>
I work with the benchmarking team and, following up on the e-mail below, we
would need your support in completing the linked survey based on the
ER&amp;D work you are doing with <strong>{{client_name}}</strong>
(<strong>{{case_code}}</strong>). To kick-start this data collection, we have
two asks at this point:
</p>

<ul>
<li>Identify a case team member who can work with us on filling the survey;
we will provide the access link from our end.</li>
<li>Set up a brief call to align on what data is available and how we can
best work together. Let me know what works best for you.</li>
</ul>

<p>Thank you,<br/>{{poc_display_name}}</p>

<p><em>More details on the survey</em></p>

<p><strong>Content:</strong> Instructions are on the first tab, with
definitions throughout. We collect data across demographics, overall
ER&amp;D cost and organization, and software-specific metrics (feel free to
skip the software tab if it is not relevant). We aim to capture both the
as-is state at the start of the work and the committed to-be targets.</p>
"#;

const BODY_ERD_ESCALATION: &str = r#"
<p>Hi {{case_manager_name}},</p>

<p>Hope you're doing well.</p>

<p>
I lead the ER&amp;D benchmarking team and, following up on the below, it
would be great if you could connect us to a team member who can help in
filling the ER&amp;D data survey for <strong>{{client_name}}</strong>.
</p>

<p>
If you're tied up with case work, please feel free to let us know if we
should get back at a later date.
</p>

<p>Looking forward to hearing from you.</p>

<p>Best,<br/>Benchmarking Team Lead</p>
"#;

// Generic wording for functions without approved copy. Same structure as
// the ER&D set; {{function_label}} names the function.

const BODY_GENERIC_INITIAL: &str = r#"
<p>Hi {{case_manager_name}},</p>

<p>Hope you are doing well!</p>

<p>
I am writing regarding your work with <strong>{{client_name}}</strong>
(<strong>{{case_code}}</strong>) and our ongoing data collection initiative
for <strong>{{function_label}}</strong>. We would like your support with our
effort to build proprietary {{function_label}} benchmarking databases.
</p>

<p>
The benchmarking team (in cc) will follow up with specifics and support you
throughout the process. In case of any concerns about data handling or
confidentiality, note that we follow a rigorous double-blind process to
protect client information.
</p>

<p>Thanks in advance!</p>

<p>Best,<br/>Practice Management</p>
"#;

const BODY_GENERIC_FOLLOWUP: &str = r#"
<p>Hi {{case_manager_name}},</p>

<p>Hope you're doing well!</p>

<p>
Following up on the note below, we would appreciate your support in
completing the linked survey for <strong>{{function_label}}</strong> based on
the work with <strong>{{client_name}}</strong>
(<strong>{{case_code}}</strong>). To kick-start, we have two quick asks:
</p>

<ul>
<li>Identify a team member who can work with us to fill the survey; we will
share access from our end.</li>
<li>Set up a brief call to align on available data and the best way to
collaborate.</li>
</ul>

<p>Thank you,<br/>{{poc_display_name}}</p>

<p><em>More details on the survey</em></p>

<p><strong>Content:</strong> Sections include basic demographics, process
measures, and performance indicators relevant to {{function_label}}. We aim
to collect both the as-is state and the committed to-be targets.</p>
"#;

const BODY_GENERIC_ESCALATION: &str = r#"
<p>Hi {{case_manager_name}},</p>

<p>Hope you're doing well.</p>

<p>
Following up on the below, it would be great if you could connect us to a
team member who can help fill the {{function_label}} data survey for
<strong>{{client_name}}</strong>.
</p>

<p>
If you're tied up with case work, happy to reconnect at a later date.
Looking forward to hearing from you.
</p>

<p>Best,<br/>Benchmarking Team Lead</p>
"#;

fn variants(initial: &str, followup: &str, escalation: &str) -> Vec<TemplateVariant> {
    vec![
        TemplateVariant {
            key: "initial".into(),
            label: "Initial".into(),
            subject: SUBJECT.into(),
            body: initial.trim().into(),
        },
        TemplateVariant {
            key: "followup".into(),
            label: "Follow-Up".into(),
            subject: SUBJECT.into(),
            body: followup.trim().into(),
        },
        TemplateVariant {
            key: "escalation".into(),
            label: "Escalation".into(),
            subject: SUBJECT.into(),
            body: escalation.trim().into(),
        },
    ]
}

fn generic_category(name: &str) -> Category {
    Category {
        name: name.into(),
        extra_cc: Vec::new(),
        variants: variants(
            BODY_GENERIC_INITIAL,
            BODY_GENERIC_FOLLOWUP,
            BODY_GENERIC_ESCALATION,
        ),
    }
}

pub(super) fn category_set() -> CategorySet {
    CategorySet {
        categories: vec![
            Category {
                name: "ER&D".into(),
                extra_cc: Vec::new(),
                variants: variants(BODY_ERD_INITIAL, BODY_ERD_FOLLOWUP, BODY_ERD_ESCALATION),
            },
            generic_category("Supply Chain"),
            generic_category("Procurement"),
            generic_category("Manufacturing"),
        ],
    }
}
