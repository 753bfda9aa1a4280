//! Canned postings for tests.

/// A posting as it should land on disk: `<category>/<name>` with `content`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SamplePosting {
    pub category: &'static str,
    pub name: &'static str,
    pub subject: &'static str,
    pub body: &'static str,
}

impl SamplePosting {
    /// Full file content, header block included.
    #[must_use]
    pub fn content(&self) -> String {
        posting_text(self.subject, self.body)
    }
}

/// Render a minimal but realistic posting with the given subject and body.
///
/// ```
/// use newsloader::testing::posting_text;
///
/// let text = posting_text("Re: orbits", "Kepler was right.");
/// assert!(text.contains("\nSubject: Re: orbits\n"));
/// assert!(text.ends_with("\n\nKepler was right."));
/// ```
#[must_use]
pub fn posting_text(subject: &str, body: &str) -> String {
    format!(
        "Xref: cantaloupe.srv.cs.cmu.edu misc:1\n\
         Path: cantaloupe.srv.cs.cmu.edu!news\n\
         From: poster@example.edu\n\
         Newsgroups: misc\n\
         Subject: {subject}\n\
         Date: 5 Apr 93 12:00:00 GMT\n\
         Lines: 1\n\
         \n\
         {body}"
    )
}

/// Well-formed postings spread over three categories.
#[must_use]
pub fn sample_postings() -> Vec<SamplePosting> {
    vec![
        SamplePosting {
            category: "rec.sport.hockey",
            name: "52550",
            subject: "Great game",
            body: "Hello there\nbody continues",
        },
        SamplePosting {
            category: "rec.sport.hockey",
            name: "52551",
            subject: "Re: Great game",
            body: "> Hello there\n\nAgreed.\n",
        },
        SamplePosting {
            category: "sci.space",
            name: "60150",
            subject: "Shuttle launch schedule",
            body: "Next launch is in May.\n",
        },
        SamplePosting {
            category: "comp.graphics",
            name: "37261",
            subject: "Looking for a GIF decoder",
            body: "",
        },
    ]
}

/// `(name, content)` pairs that must all fail to parse.
#[must_use]
pub fn malformed_postings() -> Vec<(&'static str, &'static [u8])> {
    vec![
        ("no_blank_line", &b"From: a\nSubject: one line after another\nstill header"[..]),
        ("no_subject", &b"From: a\nNewsgroups: misc\n\nbody without subject"[..]),
        ("latin1", &b"From: a\nSubject: caf\xe9\n\nbody"[..]),
    ]
}
