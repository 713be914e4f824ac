//! サービスカテゴリ定義
//!
//! アプリ側で定義している固定カテゴリ一覧。並び順は部分一致時の優先順位を兼ねる。

use std::fmt;

/// サービスカテゴリ
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServiceCategory {
    AiUtilization,
    ParentContact,
    StudentManagement,
    StudentRecruitment,
    EnglishConversation,
    VideoLessons,
    ProblemPractice,
    LearningManagementSystem,
    QuestionSupport,
    Programming,
    CareerEducation,
    OnlineLessonSupport,
    HomeStudySupport,
    EarlyEducation,
    InstructorTraining,
    DevicesAndIct,
    ConsultingAndFranchise,
    SubsidySupport,
    OtherAdministration,
}

impl ServiceCategory {
    /// 正規順のカテゴリ一覧（先頭ほど優先）
    pub const ALL: [ServiceCategory; 19] = [
        ServiceCategory::AiUtilization,
        ServiceCategory::ParentContact,
        ServiceCategory::StudentManagement,
        ServiceCategory::StudentRecruitment,
        ServiceCategory::EnglishConversation,
        ServiceCategory::VideoLessons,
        ServiceCategory::ProblemPractice,
        ServiceCategory::LearningManagementSystem,
        ServiceCategory::QuestionSupport,
        ServiceCategory::Programming,
        ServiceCategory::CareerEducation,
        ServiceCategory::OnlineLessonSupport,
        ServiceCategory::HomeStudySupport,
        ServiceCategory::EarlyEducation,
        ServiceCategory::InstructorTraining,
        ServiceCategory::DevicesAndIct,
        ServiceCategory::ConsultingAndFranchise,
        ServiceCategory::SubsidySupport,
        ServiceCategory::OtherAdministration,
    ];

    /// どれにも当てはまらない場合のカテゴリ
    pub const FALLBACK: ServiceCategory = ServiceCategory::OtherAdministration;

    /// DBに書き込む表示名
    pub fn label(self) -> &'static str {
        match self {
            ServiceCategory::AiUtilization => "AI活用",
            ServiceCategory::ParentContact => "保護者連絡",
            ServiceCategory::StudentManagement => "生徒管理",
            ServiceCategory::StudentRecruitment => "生徒集客",
            ServiceCategory::EnglishConversation => "英会話",
            ServiceCategory::VideoLessons => "映像授業",
            ServiceCategory::ProblemPractice => "問題演習",
            ServiceCategory::LearningManagementSystem => "学習管理システム(LMS)",
            ServiceCategory::QuestionSupport => "質問対応",
            ServiceCategory::Programming => "プログラミング",
            ServiceCategory::CareerEducation => "探求・キャリア教育/総合型選抜対策",
            ServiceCategory::OnlineLessonSupport => "オンライン授業支援",
            ServiceCategory::HomeStudySupport => "家庭学習支援",
            ServiceCategory::EarlyEducation => "知育/能力開発/幼児教育",
            ServiceCategory::InstructorTraining => "講師採用/育成/研修",
            ServiceCategory::DevicesAndIct => "デバイス・ハードウェア・ICT環境構築",
            ServiceCategory::ConsultingAndFranchise => "コンサル/フランチャイズ/M&A",
            ServiceCategory::SubsidySupport => "助成金・補助金支援",
            ServiceCategory::OtherAdministration => "その他管理/代行",
        }
    }
}

impl fmt::Display for ServiceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
