/// Events sent from analysis workers to the progress display
#[derive(Clone, Debug)]
pub enum ProgressMessage {
    Started {
        total: usize,
    },
    Progress {
        file: Option<String>,
    },
    Failed {
        file: String,
        error: String,
    },
    Finished,
    Exit,
}
