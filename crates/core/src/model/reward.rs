use serde::Serialize;

/// What sort of tip a reward carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RewardKind {
    Calculator,
    Quote,
    Strategy,
}

/// A tip shown to the student when a topic reaches a new mastery tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Reward {
    pub kind: RewardKind,
    pub title: &'static str,
    pub content: &'static str,
}

/// Every reward that can be unlocked.
pub static REWARDS: [Reward; 6] = [
    Reward {
        kind: RewardKind::Calculator,
        title: "CASIO fx-991EX Tip",
        content: "Did you know? You can solve Quadratic Equations instantly! \
                  Go to Menu > Equation/Func > Polynomial > Degree 2.",
    },
    Reward {
        kind: RewardKind::Quote,
        title: "Power Value",
        content: "\"Mathematics is not about numbers, equations, computations, or algorithms: \
                  it is about understanding.\" - William Paul Thurston",
    },
    Reward {
        kind: RewardKind::Strategy,
        title: "Exam Strategy",
        content: "Always start with the questions you find easiest. \
                  This builds confidence and secures marks early!",
    },
    Reward {
        kind: RewardKind::Calculator,
        title: "CASIO fx-991EX Tip",
        content: "Use the CALC button to evaluate expressions for different values of x \
                  without retyping the formula.",
    },
    Reward {
        kind: RewardKind::Quote,
        title: "Life Quote",
        content: "\"Success is the sum of small efforts, repeated day in and day out.\" \
                  - Robert Collier",
    },
    Reward {
        kind: RewardKind::Strategy,
        title: "Walkthrough Tip",
        content: "Show ALL your working. Even if the final answer is wrong, \
                  you get marks for the method!",
    },
];
