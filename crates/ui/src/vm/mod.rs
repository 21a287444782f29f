mod card_vm;
mod exam_vm;
mod percent_fmt;
mod slideshow_vm;

pub use card_vm::{CardFeedback, CardVm};
pub use exam_vm::{ExamQuestionVm, ExamRowVm, ExamStage, ExamViewState, ExamVm};
pub use percent_fmt::progress_width_style;
pub use slideshow_vm::{SlideVm, SlideshowViewState, SlideshowVm};
