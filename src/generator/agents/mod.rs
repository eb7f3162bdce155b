// 四个阶段按顺序执行，每个阶段的完整文本产出是下一个阶段的输入
// A ResearchAnalyst：公司/行业调研 = 名称 + 一次网络搜索
// B UseCaseArchitect：AI用例 = A
// C ResourceScout：数据集与代码仓库 = B 中提取的主题 + 名称（不调用大模型）
// D ProposalWriter：商业提案 = A + B + C

pub mod proposal_writer;
pub mod research_analyst;
pub mod resource_scout;
pub mod use_case_architect;

pub use proposal_writer::ProposalWriter;
pub use research_analyst::ResearchAnalyst;
pub use resource_scout::ResourceScout;
pub use use_case_architect::UseCaseArchitect;
