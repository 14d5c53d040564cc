mod exam_vm;

pub use exam_vm::{
    ImageVm, IndexCellVm, OptionVm, QuestionVm, map_current_question, map_index_cells,
    progress_label, start_label,
};
