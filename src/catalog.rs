#[derive(Clone, Debug, PartialEq)]
pub struct Project {
    pub title: &'static str,
    pub description: &'static str,
    pub technologies: &'static [&'static str],
    pub github: &'static str,
    pub demo: &'static str,
}

const PINNED: &[Project] = &[
    Project {
        title: "PRG 1",
        description: "First major project description",
        technologies: &["React", "Node.js", "MongoDB"],
        github: "https://github.com/RishitTandon7/prg1",
        demo: "https://prg1-demo.com",
    },
    Project {
        title: "PRG 2",
        description: "Second major project description",
        technologies: &["Python", "TensorFlow"],
        github: "https://github.com/RishitTandon7/prg2",
        demo: "https://prg2-demo.com",
    },
    Project {
        title: "PRG 3",
        description: "Third major project description",
        technologies: &["Angular", "Firebase"],
        github: "https://github.com/RishitTandon7/prg3",
        demo: "https://prg3-demo.com",
    },
    Project {
        title: "PRG 4",
        description: "Fourth major project description",
        technologies: &["Vue.js", "Express"],
        github: "https://github.com/RishitTandon7/prg4",
        demo: "https://prg4-demo.com",
    },
];

const ADDITIONAL: &[Project] = &[
    Project {
        title: "PRG 5",
        description: "Fifth project description",
        technologies: &["React Native", "Firebase"],
        github: "https://github.com/RishitTandon7/prg5",
        demo: "https://prg5-demo.com",
    },
    Project {
        title: "PRG 6",
        description: "Sixth project description",
        technologies: &["Django", "MySQL"],
        github: "https://github.com/RishitTandon7/prg6",
        demo: "https://prg6-demo.com",
    },
    Project {
        title: "PRG 7",
        description: "Seventh project description",
        technologies: &["Flutter", "Firebase"],
        github: "https://github.com/RishitTandon7/prg7",
        demo: "https://prg7-demo.com",
    },
    Project {
        title: "PRG 8",
        description: "Eighth project description",
        technologies: &["MERN Stack"],
        github: "https://github.com/RishitTandon7/prg8",
        demo: "https://prg8-demo.com",
    },
];

/// Projects always shown on the landing page.
pub fn pinned() -> &'static [Project] {
    PINNED
}

/// Projects only reachable through the slideshow.
pub fn additional() -> &'static [Project] {
    ADDITIONAL
}
