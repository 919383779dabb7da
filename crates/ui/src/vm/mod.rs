mod quiz_vm;

pub use quiz_vm::{PlayerVm, QuizVm, RevealedVm, map_quiz_vm};
