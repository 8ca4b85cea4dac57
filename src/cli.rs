use clap::{Parser, Subcommand};
use home_online_common::{ApplicationType, OfferSortKey};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "home-online")]
#[command(about = "住宅ローン申込ダッシュボード（書類トラッカー・オファー比較）", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// ストアファイル（省略時は設定/環境変数 HOME_ONLINE_STORE）
    #[arg(long, global = true)]
    pub store: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 申込を作成（書類チェックリストを初期化）
    Init {
        /// 申込種別 (first-time/new/refinance)
        #[arg(short = 't', long = "type", default_value = "first-time")]
        kind: ApplicationType,

        /// 氏名
        #[arg(long)]
        name: String,

        /// メールアドレス
        #[arg(long)]
        email: String,

        /// 電話番号
        #[arg(long)]
        phone: String,

        /// 既存の申込を上書き
        #[arg(long)]
        force: bool,
    },

    /// 申込状況（ステージ・進捗）を表示
    Status,

    /// 書類チェックリストを表示
    Docs,

    /// 書類にファイルを添付
    Upload {
        /// 書類ID
        #[arg(required = true)]
        doc_id: String,

        /// 添付するファイル
        #[arg(required = true)]
        file: PathBuf,
    },

    /// 書類からファイルを削除
    Remove {
        /// 書類ID
        #[arg(required = true)]
        doc_id: String,

        /// ファイル番号（0始まり）
        #[arg(required = true)]
        index: usize,
    },

    /// 管理者審査に提出
    Review,

    /// 金融機関のオファーを受け取る
    Offers,

    /// 金融機関ごとの審査状況を表示
    Lenders,

    /// 承認済みオファーを比較
    Compare {
        /// 並び順 (rate/comparison/monthly/total/upfront)
        #[arg(short, long, default_value = "rate")]
        sort: OfferSortKey,
    },

    /// オファーを確定
    Accept {
        /// オファーID（省略時は対話選択）
        offer_id: Option<String>,

        /// 確認を省略
        #[arg(short, long)]
        yes: bool,
    },

    /// オファー比較表をExcelに出力
    Export {
        /// 出力ファイル/ディレクトリ
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// 並び順 (rate/comparison/monthly/total/upfront)
        #[arg(short, long, default_value = "rate")]
        sort: OfferSortKey,

        /// シートタイトル
        #[arg(short, long, default_value = "Offer Comparison")]
        title: String,
    },

    /// アクティビティログを表示
    Log,

    /// 設定を表示/編集
    Config {
        /// 管理者審査の擬似遅延（ミリ秒）
        #[arg(long)]
        review_delay: Option<u64>,

        /// オファー受領の擬似遅延（ミリ秒）
        #[arg(long)]
        offer_delay: Option<u64>,

        /// ストアファイルの場所を保存
        #[arg(long)]
        set_store: Option<PathBuf>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}
